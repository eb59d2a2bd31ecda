//! `SeaORM` implementation of the `InstructorService` trait.

use crate::db::Store;
use crate::entities::schedules;
use crate::models::{ScheduleType, Status};
use crate::services::instructor_service::{
    Dashboard, InstructorError, InstructorService, NewSchedule,
};
use async_trait::async_trait;

/// Dashboard shows at most this many recent activity entries.
const ACTIVITY_LIMIT: u64 = 20;

pub struct SeaOrmInstructorService {
    store: Store,
}

impl SeaOrmInstructorService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn instructor_id_for_user(&self, user_id: i32) -> Result<i32, InstructorError> {
        self.store
            .get_instructor_by_user_id(user_id)
            .await?
            .map(|instructor| instructor.id)
            .ok_or(InstructorError::ProfileNotFound)
    }
}

#[async_trait]
impl InstructorService for SeaOrmInstructorService {
    async fn dashboard(&self, user_id: i32) -> Result<Dashboard, InstructorError> {
        let (instructor, department) = self
            .store
            .get_instructor_with_department(user_id)
            .await?
            .ok_or(InstructorError::ProfileNotFound)?;

        let schedules = self.store.schedules_for_instructor(instructor.id).await?;
        let activity = self
            .store
            .recent_activity(instructor.id, ACTIVITY_LIMIT)
            .await?;

        Ok(Dashboard {
            instructor_id: instructor.id,
            status: instructor.status,
            department,
            schedules,
            activity,
        })
    }

    async fn set_status(&self, user_id: i32, new_status: &str) -> Result<String, InstructorError> {
        // Validate before resolving the profile; an invalid value must
        // never mutate anything.
        let status = Status::parse(new_status).ok_or(InstructorError::InvalidStatus)?;

        let instructor_id = self.instructor_id_for_user(user_id).await?;
        let old_status = self.store.set_instructor_status(instructor_id, status).await?;

        tracing::info!(
            instructor_id,
            from = %old_status,
            to = %status,
            "Status changed"
        );

        Ok(old_status)
    }

    async fn schedule_absence(
        &self,
        user_id: i32,
        input: NewSchedule,
    ) -> Result<schedules::Model, InstructorError> {
        let schedule_type = ScheduleType::parse(&input.schedule_type)
            .ok_or(InstructorError::InvalidScheduleType)?;

        // Presence only; date ordering and calendar validity are
        // deliberately not checked.
        if input.start_date.is_empty() || input.end_date.is_empty() {
            return Err(InstructorError::MissingDates);
        }

        let instructor_id = self.instructor_id_for_user(user_id).await?;
        let schedule = self
            .store
            .add_schedule(
                instructor_id,
                schedule_type,
                &input.start_date,
                &input.end_date,
                input.reason.trim(),
            )
            .await?;

        tracing::info!(
            instructor_id,
            schedule_type = %schedule_type,
            start = %schedule.start_date,
            end = %schedule.end_date,
            "Absence scheduled"
        );

        Ok(schedule)
    }
}
