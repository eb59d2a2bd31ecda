use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::{activity_log, departments, instructors, schedules};
use crate::models::{Role, ScheduleType, Status};

pub mod migrator;
pub mod repositories;

pub use repositories::instructor::DirectoryEntry;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("memory") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        conn.execute(Statement::from_string(
            conn.get_database_backend(),
            "PRAGMA foreign_keys = ON".to_string(),
        ))
        .await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn department_repo(&self) -> repositories::department::DepartmentRepository {
        repositories::department::DepartmentRepository::new(self.conn.clone())
    }

    fn instructor_repo(&self) -> repositories::instructor::InstructorRepository {
        repositories::instructor::InstructorRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo().verify_credentials(username, password).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
        role: Role,
        config: Option<&SecurityConfig>,
    ) -> Result<User> {
        self.user_repo()
            .create(username, password, full_name, role, config)
            .await
    }

    // ========== Departments ==========

    pub async fn list_departments(&self) -> Result<Vec<departments::Model>> {
        self.department_repo().list_all().await
    }

    pub async fn get_department(&self, id: i32) -> Result<Option<departments::Model>> {
        self.department_repo().get(id).await
    }

    // ========== Instructors ==========

    pub async fn get_instructor_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<instructors::Model>> {
        self.instructor_repo().get_by_user_id(user_id).await
    }

    pub async fn get_instructor_with_department(
        &self,
        user_id: i32,
    ) -> Result<Option<(instructors::Model, departments::Model)>> {
        self.instructor_repo().get_with_department(user_id).await
    }

    pub async fn list_instructors_in_department(
        &self,
        department_id: i32,
    ) -> Result<Vec<DirectoryEntry>> {
        self.instructor_repo()
            .list_in_department(department_id)
            .await
    }

    pub async fn schedules_for_instructor(
        &self,
        instructor_id: i32,
    ) -> Result<Vec<schedules::Model>> {
        self.instructor_repo().schedules_for(instructor_id).await
    }

    pub async fn recent_activity(
        &self,
        instructor_id: i32,
        limit: u64,
    ) -> Result<Vec<activity_log::Model>> {
        self.instructor_repo()
            .recent_activity(instructor_id, limit)
            .await
    }

    pub async fn activity_count(&self, instructor_id: i32) -> Result<u64> {
        self.instructor_repo().activity_count(instructor_id).await
    }

    pub async fn set_instructor_status(
        &self,
        instructor_id: i32,
        new_status: Status,
    ) -> Result<String> {
        self.instructor_repo()
            .set_status(instructor_id, new_status)
            .await
    }

    pub async fn add_schedule(
        &self,
        instructor_id: i32,
        schedule_type: ScheduleType,
        start_date: &str,
        end_date: &str,
        reason: &str,
    ) -> Result<schedules::Model> {
        self.instructor_repo()
            .add_schedule(instructor_id, schedule_type, start_date, end_date, reason)
            .await
    }
}
