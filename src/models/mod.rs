pub mod identity;
pub mod status;

pub use identity::Identity;
pub use status::{Role, ScheduleType, Status};
