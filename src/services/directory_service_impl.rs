//! `SeaORM` implementation of the `DirectoryService` trait.

use crate::db::Store;
use crate::entities::departments;
use crate::services::directory_service::{
    DepartmentDetail, DirectoryError, DirectoryService, InstructorRow,
};
use async_trait::async_trait;

pub struct SeaOrmDirectoryService {
    store: Store,
}

impl SeaOrmDirectoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DirectoryService for SeaOrmDirectoryService {
    async fn list_departments(&self) -> Result<Vec<departments::Model>, DirectoryError> {
        Ok(self.store.list_departments().await?)
    }

    async fn department_detail(
        &self,
        department_id: i32,
    ) -> Result<DepartmentDetail, DirectoryError> {
        // Existence check first; unknown ids never touch the instructor
        // table.
        let department = self
            .store
            .get_department(department_id)
            .await?
            .ok_or(DirectoryError::DepartmentNotFound)?;

        let instructors = self
            .store
            .list_instructors_in_department(department_id)
            .await?
            .into_iter()
            .map(|entry| InstructorRow {
                id: entry.instructor_id,
                full_name: entry.full_name,
                status: entry.status,
            })
            .collect();

        Ok(DepartmentDetail {
            department,
            instructors,
        })
    }
}
