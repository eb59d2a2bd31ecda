use crate::entities::{activity_log, departments, instructors, prelude::*, users};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::Query;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Hash the demo password using Argon2id
fn hash_demo_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let password = b"password";
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password, &salt)
        .expect("Failed to hash demo password")
        .to_string()
}

const DEPARTMENTS: &[(i32, &str, &str)] = &[
    (1, "College of Computing Studies", "CCS"),
    (2, "College of Engineering", "COE"),
    (3, "College of Education", "CED"),
    (4, "College of Arts and Sciences", "CAS"),
    (5, "College of Business Administration", "CBA"),
];

/// (user id, username, full name, department id, initial status)
const INSTRUCTORS: &[(i32, &str, &str, i32, &str)] = &[
    (1, "jdoe", "John Doe", 1, "In"),
    (2, "asmith", "Anna Smith", 1, "Out"),
    (3, "bcruz", "Benjamin Cruz", 2, "On Leave"),
    (4, "mgarcia", "Maria Garcia", 2, "In"),
    (5, "rlopez", "Roberto Lopez", 3, "On Travel"),
    (6, "lreyes", "Lorna Reyes", 3, "In"),
    (7, "pnavarro", "Pedro Navarro", 4, "Out"),
    (8, "ctan", "Carmen Tan", 4, "In"),
    (9, "jsantos", "Jose Santos", 5, "In"),
    (10, "mvillar", "Marta Villar", 5, "On Leave"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One hash for every demo account; they all share the password.
        let password_hash = hash_demo_password();
        let now = chrono::Utc::now().to_rfc3339();

        for &(id, name, code) in DEPARTMENTS {
            let insert = Query::insert()
                .into_table(Departments)
                .columns([
                    departments::Column::Id,
                    departments::Column::Name,
                    departments::Column::Code,
                ])
                .values_panic([id.into(), name.into(), code.into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        for &(user_id, username, full_name, department_id, status) in INSTRUCTORS {
            let insert = Query::insert()
                .into_table(Users)
                .columns([
                    users::Column::Id,
                    users::Column::Username,
                    users::Column::PasswordHash,
                    users::Column::FullName,
                    users::Column::Role,
                ])
                .values_panic([
                    user_id.into(),
                    username.into(),
                    password_hash.clone().into(),
                    full_name.into(),
                    "instructor".into(),
                ])
                .to_owned();
            manager.exec_stmt(insert).await?;

            let insert = Query::insert()
                .into_table(Instructors)
                .columns([
                    instructors::Column::Id,
                    instructors::Column::UserId,
                    instructors::Column::DepartmentId,
                    instructors::Column::Status,
                ])
                .values_panic([
                    user_id.into(),
                    user_id.into(),
                    department_id.into(),
                    status.into(),
                ])
                .to_owned();
            manager.exec_stmt(insert).await?;

            let insert = Query::insert()
                .into_table(ActivityLog)
                .columns([
                    activity_log::Column::InstructorId,
                    activity_log::Column::Action,
                    activity_log::Column::Details,
                    activity_log::Column::Timestamp,
                ])
                .values_panic([
                    user_id.into(),
                    "Status set".into(),
                    format!("Status set to {status}").into(),
                    now.clone().into(),
                ])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        // Demo student account
        let insert = Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Username,
                users::Column::PasswordHash,
                users::Column::FullName,
                users::Column::Role,
            ])
            .values_panic([
                "student".into(),
                password_hash.into(),
                "Juan Antonio".into(),
                "student".into(),
            ])
            .to_owned();
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(ActivityLog).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Schedules).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Instructors).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Departments).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Users).to_owned())
            .await?;

        Ok(())
    }
}
