pub use super::activity_log::Entity as ActivityLog;
pub use super::departments::Entity as Departments;
pub use super::instructors::Entity as Instructors;
pub use super::schedules::Entity as Schedules;
pub use super::users::Entity as Users;
