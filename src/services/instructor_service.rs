//! Instructor state transitions: status changes and absence schedules.
//!
//! Every successful mutation pairs the status write with exactly one
//! activity-log entry inside a store-level transaction; validation
//! failures never touch the store.

use serde::Serialize;
use thiserror::Error;

use crate::entities::{activity_log, departments, schedules};

#[derive(Debug, Error)]
pub enum InstructorError {
    /// The authenticated user has no instructor row. Distinct from a
    /// role denial: the caller was allowed through the role gate.
    #[error("Instructor profile not found")]
    ProfileNotFound,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Invalid schedule type")]
    InvalidScheduleType,

    #[error("Start and end dates are required")]
    MissingDates,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for InstructorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Everything the instructor dashboard shows.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub instructor_id: i32,
    pub status: String,
    pub department: departments::Model,
    /// Newest start date first.
    pub schedules: Vec<schedules::Model>,
    /// Last 20 entries, newest first.
    pub activity: Vec<activity_log::Model>,
}

/// Raw schedule input as submitted; validated by the service.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub schedule_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

#[async_trait::async_trait]
pub trait InstructorService: Send + Sync {
    /// Dashboard data for the instructor owned by `user_id`.
    async fn dashboard(&self, user_id: i32) -> Result<Dashboard, InstructorError>;

    /// Sets the instructor's status. Any current status may transition
    /// to any valid target, including itself; the transition is logged
    /// either way.
    ///
    /// # Errors
    ///
    /// [`InstructorError::InvalidStatus`] for values outside the four
    /// enumerated ones; nothing is written in that case.
    async fn set_status(&self, user_id: i32, new_status: &str) -> Result<String, InstructorError>;

    /// Records a planned absence and derives the new status from its
    /// type. Dates are only checked for presence, not ordering or
    /// calendar validity.
    async fn schedule_absence(
        &self,
        user_id: i32,
        input: NewSchedule,
    ) -> Result<schedules::Model, InstructorError>;
}
