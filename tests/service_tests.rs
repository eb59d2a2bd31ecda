use facultydesk::db::Store;
use facultydesk::models::{Role, ScheduleType, Status};
use facultydesk::services::{
    InstructorError, InstructorService, NewSchedule, SeaOrmInstructorService,
};

// A single connection keeps every query on the same in-memory database.
async fn test_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store")
}

#[tokio::test]
async fn directory_orders_instructors_by_name() {
    let store = test_store().await;

    let entries = store.list_instructors_in_department(1).await.unwrap();

    // Anna Smith is seeded after John Doe but sorts first.
    let names: Vec<&str> = entries.iter().map(|e| e.full_name.as_str()).collect();
    assert_eq!(names, vec!["Anna Smith", "John Doe"]);
    assert_eq!(entries[0].status, "Out");
    assert_eq!(entries[1].status, "In");
}

#[tokio::test]
async fn empty_department_yields_empty_roster() {
    let store = test_store().await;

    // No instructors reference a department that doesn't exist.
    let entries = store.list_instructors_in_department(999).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn status_change_writes_exactly_one_log_entry() {
    let store = test_store().await;

    let before = store.activity_count(1).await.unwrap();
    let old = store
        .set_instructor_status(1, Status::Out)
        .await
        .unwrap();

    assert_eq!(old, "In");
    assert_eq!(store.activity_count(1).await.unwrap(), before + 1);

    let instructor = store.get_instructor_by_user_id(1).await.unwrap().unwrap();
    assert_eq!(instructor.status, "Out");

    let activity = store.recent_activity(1, 20).await.unwrap();
    assert_eq!(activity[0].action, "Status changed");
    assert_eq!(activity[0].details.as_deref(), Some("Changed from In to Out"));
}

#[tokio::test]
async fn self_transition_is_still_logged() {
    let store = test_store().await;

    let old = store.set_instructor_status(1, Status::In).await.unwrap();
    assert_eq!(old, "In");

    let activity = store.recent_activity(1, 20).await.unwrap();
    assert_eq!(activity[0].details.as_deref(), Some("Changed from In to In"));
}

#[tokio::test]
async fn scheduling_leave_derives_status_and_logs() {
    let store = test_store().await;
    let service = SeaOrmInstructorService::new(store.clone());

    // jdoe is user_id 1, instructor 1, currently "In".
    let schedule = service
        .schedule_absence(
            1,
            NewSchedule {
                schedule_type: "leave".to_string(),
                start_date: "2026-03-01".to_string(),
                end_date: "2026-03-05".to_string(),
                reason: "Personal leave".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(schedule.schedule_type, "leave");
    assert_eq!(schedule.reason.as_deref(), Some("Personal leave"));

    let instructor = store.get_instructor_by_user_id(1).await.unwrap().unwrap();
    assert_eq!(instructor.status, "On Leave");

    let activity = store.recent_activity(1, 20).await.unwrap();
    assert_eq!(activity[0].action, "Scheduled leave");
    assert_eq!(
        activity[0].details.as_deref(),
        Some("Leave from 2026-03-01 to 2026-03-05: Personal leave")
    );
}

#[tokio::test]
async fn scheduling_travel_sets_on_travel() {
    let store = test_store().await;
    let service = SeaOrmInstructorService::new(store.clone());

    service
        .schedule_absence(
            1,
            NewSchedule {
                schedule_type: "travel".to_string(),
                start_date: "2026-04-10".to_string(),
                end_date: "2026-04-12".to_string(),
                reason: String::new(),
            },
        )
        .await
        .unwrap();

    let instructor = store.get_instructor_by_user_id(1).await.unwrap().unwrap();
    assert_eq!(instructor.status, "On Travel");

    // Blank reason is stored as absent, not empty string.
    let schedules = store.schedules_for_instructor(1).await.unwrap();
    assert_eq!(schedules[0].reason, None);
}

#[tokio::test]
async fn invalid_schedule_type_mutates_nothing() {
    let store = test_store().await;
    let service = SeaOrmInstructorService::new(store.clone());

    let before = store.activity_count(1).await.unwrap();
    let err = service
        .schedule_absence(
            1,
            NewSchedule {
                schedule_type: "vacation".to_string(),
                start_date: "2026-03-01".to_string(),
                end_date: "2026-03-05".to_string(),
                reason: String::new(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, InstructorError::InvalidScheduleType));

    let instructor = store.get_instructor_by_user_id(1).await.unwrap().unwrap();
    assert_eq!(instructor.status, "In");
    assert!(store.schedules_for_instructor(1).await.unwrap().is_empty());
    assert_eq!(store.activity_count(1).await.unwrap(), before);
}

#[tokio::test]
async fn missing_dates_are_rejected() {
    let store = test_store().await;
    let service = SeaOrmInstructorService::new(store.clone());

    for (start, end) in [("", "2026-03-05"), ("2026-03-01", ""), ("", "")] {
        let err = service
            .schedule_absence(
                1,
                NewSchedule {
                    schedule_type: "leave".to_string(),
                    start_date: start.to_string(),
                    end_date: end.to_string(),
                    reason: String::new(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, InstructorError::MissingDates));
    }

    assert!(store.schedules_for_instructor(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_status_string_is_rejected() {
    let store = test_store().await;
    let service = SeaOrmInstructorService::new(store.clone());

    for bad in ["Sick", "in", "OUT", "", "On  Leave"] {
        let err = service.set_status(1, bad).await.unwrap_err();
        assert!(matches!(err, InstructorError::InvalidStatus), "{bad}");
    }

    let instructor = store.get_instructor_by_user_id(1).await.unwrap().unwrap();
    assert_eq!(instructor.status, "In");
}

#[tokio::test]
async fn instructor_without_profile_is_not_found() {
    let store = test_store().await;
    let service = SeaOrmInstructorService::new(store.clone());

    // An instructor-role account can exist before its instructor row
    // does; that is a 404, not a role denial.
    let user = store
        .create_user("newhire", "password", "Nina Hire", Role::Instructor, None)
        .await
        .unwrap();

    let err = service.dashboard(user.id).await.unwrap_err();
    assert!(matches!(err, InstructorError::ProfileNotFound));
    assert!(matches!(
        facultydesk::api::ApiError::from(err),
        facultydesk::api::ApiError::NotFound(_)
    ));

    let err = service.set_status(user.id, "Out").await.unwrap_err();
    assert!(matches!(err, InstructorError::ProfileNotFound));

    let err = service
        .schedule_absence(
            user.id,
            NewSchedule {
                schedule_type: "leave".to_string(),
                start_date: "2026-03-01".to_string(),
                end_date: "2026-03-05".to_string(),
                reason: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, InstructorError::ProfileNotFound));
}

#[tokio::test]
async fn recent_activity_is_capped() {
    let store = test_store().await;

    // Seed log plus 25 transitions.
    for _ in 0..25 {
        store.set_instructor_status(1, Status::Out).await.unwrap();
    }

    let activity = store.recent_activity(1, 20).await.unwrap();
    assert_eq!(activity.len(), 20);
    assert_eq!(store.activity_count(1).await.unwrap(), 26);

    // Newest first.
    for pair in activity.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[tokio::test]
async fn schedules_listed_newest_start_first() {
    let store = test_store().await;

    store
        .add_schedule(1, ScheduleType::Leave, "2026-03-01", "2026-03-05", "")
        .await
        .unwrap();
    store
        .add_schedule(1, ScheduleType::Travel, "2026-05-01", "2026-05-02", "")
        .await
        .unwrap();

    let schedules = store.schedules_for_instructor(1).await.unwrap();
    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[0].start_date, "2026-05-01");
    assert_eq!(schedules[1].start_date, "2026-03-01");
}

#[tokio::test]
async fn verify_credentials_hides_which_part_failed() {
    let store = test_store().await;

    assert!(store.verify_credentials("jdoe", "wrong").await.unwrap().is_none());
    assert!(
        store
            .verify_credentials("ghost", "password")
            .await
            .unwrap()
            .is_none()
    );

    let user = store
        .verify_credentials("jdoe", "password")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.full_name, "John Doe");
    assert_eq!(user.role, "instructor");
}

#[tokio::test]
async fn usernames_are_unique() {
    let store = test_store().await;

    store
        .create_user("jdoe", "secret", "Another Doe", Role::Instructor, None)
        .await
        .unwrap_err();

    // The duplicate never landed.
    let user = store.get_user_by_username("jdoe").await.unwrap().unwrap();
    assert_eq!(user.full_name, "John Doe");
}

#[tokio::test]
async fn seeded_directory_is_complete() {
    let store = test_store().await;

    let departments = store.list_departments().await.unwrap();
    assert_eq!(departments.len(), 5);

    let mut total = 0;
    for dept in &departments {
        total += store
            .list_instructors_in_department(dept.id)
            .await
            .unwrap()
            .len();
    }
    assert_eq!(total, 10);

    let student = store.get_user_by_username("student").await.unwrap().unwrap();
    assert_eq!(student.role, "student");
    assert!(store.get_instructor_by_user_id(student.id).await.unwrap().is_none());
}
