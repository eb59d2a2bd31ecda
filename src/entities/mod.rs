pub mod prelude;

pub mod activity_log;
pub mod departments;
pub mod instructors;
pub mod schedules;
pub mod users;
