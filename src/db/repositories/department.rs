use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::departments;

pub struct DepartmentRepository {
    conn: DatabaseConnection,
}

impl DepartmentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All departments, name ascending.
    pub async fn list_all(&self) -> Result<Vec<departments::Model>> {
        departments::Entity::find()
            .order_by_asc(departments::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list departments")
    }

    pub async fn get(&self, id: i32) -> Result<Option<departments::Model>> {
        departments::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query department")
    }
}
