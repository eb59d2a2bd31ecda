use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::entities::{activity_log, departments, instructors, schedules, users};
use crate::models::{ScheduleType, Status};

/// Directory row for a department listing: who, and whether they are in.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub instructor_id: i32,
    pub full_name: String,
    pub status: String,
}

pub struct InstructorRepository {
    conn: DatabaseConnection,
}

impl InstructorRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_user_id(&self, user_id: i32) -> Result<Option<instructors::Model>> {
        instructors::Entity::find()
            .filter(instructors::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query instructor by user ID")
    }

    /// Instructor row together with its department, looked up by the
    /// owning user. Returns `None` when the user has no instructor row.
    pub async fn get_with_department(
        &self,
        user_id: i32,
    ) -> Result<Option<(instructors::Model, departments::Model)>> {
        let Some((instructor, department)) = instructors::Entity::find()
            .filter(instructors::Column::UserId.eq(user_id))
            .find_also_related(departments::Entity)
            .one(&self.conn)
            .await
            .context("Failed to query instructor with department")?
        else {
            return Ok(None);
        };

        let department = department
            .ok_or_else(|| anyhow::anyhow!("Instructor {} has no department", instructor.id))?;

        Ok(Some((instructor, department)))
    }

    /// Instructors in a department, full name ascending.
    pub async fn list_in_department(&self, department_id: i32) -> Result<Vec<DirectoryEntry>> {
        let rows = instructors::Entity::find()
            .filter(instructors::Column::DepartmentId.eq(department_id))
            .find_also_related(users::Entity)
            .order_by_asc(users::Column::FullName)
            .all(&self.conn)
            .await
            .context("Failed to list instructors in department")?;

        rows.into_iter()
            .map(|(instructor, user)| {
                let user = user.ok_or_else(|| {
                    anyhow::anyhow!("Instructor {} has no owning user", instructor.id)
                })?;
                Ok(DirectoryEntry {
                    instructor_id: instructor.id,
                    full_name: user.full_name,
                    status: instructor.status,
                })
            })
            .collect()
    }

    /// Schedules for an instructor, newest start date first.
    pub async fn schedules_for(&self, instructor_id: i32) -> Result<Vec<schedules::Model>> {
        schedules::Entity::find()
            .filter(schedules::Column::InstructorId.eq(instructor_id))
            .order_by_desc(schedules::Column::StartDate)
            .all(&self.conn)
            .await
            .context("Failed to list schedules")
    }

    /// Most recent activity-log entries for an instructor, newest first.
    pub async fn recent_activity(
        &self,
        instructor_id: i32,
        limit: u64,
    ) -> Result<Vec<activity_log::Model>> {
        activity_log::Entity::find()
            .filter(activity_log::Column::InstructorId.eq(instructor_id))
            .order_by_desc(activity_log::Column::Timestamp)
            .order_by_desc(activity_log::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list activity log")
    }

    pub async fn activity_count(&self, instructor_id: i32) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        activity_log::Entity::find()
            .filter(activity_log::Column::InstructorId.eq(instructor_id))
            .count(&self.conn)
            .await
            .context("Failed to count activity log")
    }

    /// Set an instructor's status and record the transition, as one
    /// transaction. Either both writes land or neither does.
    ///
    /// Returns the previous status.
    pub async fn set_status(&self, instructor_id: i32, new_status: Status) -> Result<String> {
        let txn = self.conn.begin().await?;

        let instructor = instructors::Entity::find_by_id(instructor_id)
            .one(&txn)
            .await
            .context("Failed to query instructor for status update")?
            .ok_or_else(|| anyhow::anyhow!("Instructor {instructor_id} not found"))?;

        let old_status = instructor.status.clone();

        let mut active: instructors::ActiveModel = instructor.into();
        active.status = Set(new_status.as_str().to_string());
        active.update(&txn).await?;

        activity_log::ActiveModel {
            instructor_id: Set(instructor_id),
            action: Set("Status changed".to_string()),
            details: Set(Some(format!("Changed from {old_status} to {new_status}"))),
            timestamp: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(old_status)
    }

    /// Insert a schedule, overwrite the instructor's status with the
    /// derived one, and append the audit entry, as one transaction.
    ///
    /// Dates are stored as given; only non-emptiness is validated by the
    /// service layer.
    pub async fn add_schedule(
        &self,
        instructor_id: i32,
        schedule_type: ScheduleType,
        start_date: &str,
        end_date: &str,
        reason: &str,
    ) -> Result<schedules::Model> {
        let txn = self.conn.begin().await?;

        let instructor = instructors::Entity::find_by_id(instructor_id)
            .one(&txn)
            .await
            .context("Failed to query instructor for schedule")?
            .ok_or_else(|| anyhow::anyhow!("Instructor {instructor_id} not found"))?;

        let now = chrono::Utc::now().to_rfc3339();

        let schedule = schedules::ActiveModel {
            instructor_id: Set(instructor_id),
            schedule_type: Set(schedule_type.as_str().to_string()),
            start_date: Set(start_date.to_string()),
            end_date: Set(end_date.to_string()),
            reason: Set((!reason.is_empty()).then(|| reason.to_string())),
            created_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut active: instructors::ActiveModel = instructor.into();
        active.status = Set(schedule_type.derived_status().as_str().to_string());
        active.update(&txn).await?;

        let mut details = format!(
            "{} from {start_date} to {end_date}",
            schedule_type.title()
        );
        if !reason.is_empty() {
            details.push_str(": ");
            details.push_str(reason);
        }

        activity_log::ActiveModel {
            instructor_id: Set(instructor_id),
            action: Set(format!("Scheduled {schedule_type}")),
            details: Set(Some(details)),
            timestamp: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(schedule)
    }
}
