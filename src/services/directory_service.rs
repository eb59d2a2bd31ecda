//! Read-only directory queries for the student-facing views.

use serde::Serialize;
use thiserror::Error;

use crate::entities::departments;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Recoverable "not found" notice, not an error page.
    #[error("Department not found")]
    DepartmentNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for DirectoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// One instructor in a department listing.
#[derive(Debug, Clone, Serialize)]
pub struct InstructorRow {
    pub id: i32,
    pub full_name: String,
    pub status: String,
}

/// A department together with its instructors, full name ascending.
#[derive(Debug, Serialize)]
pub struct DepartmentDetail {
    pub department: departments::Model,
    pub instructors: Vec<InstructorRow>,
}

#[async_trait::async_trait]
pub trait DirectoryService: Send + Sync {
    /// All departments, name ascending. Empty is not an error.
    async fn list_departments(&self) -> Result<Vec<departments::Model>, DirectoryError>;

    /// Department with its instructors sorted by full name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DepartmentNotFound`] for an unknown id;
    /// no instructor rows are queried in that case.
    async fn department_detail(&self, department_id: i32)
    -> Result<DepartmentDetail, DirectoryError>;
}
