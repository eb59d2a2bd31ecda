mod auth_service;
mod auth_service_impl;
mod directory_service;
mod directory_service_impl;
mod instructor_service;
mod instructor_service_impl;

pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;
pub use directory_service::{DepartmentDetail, DirectoryError, DirectoryService, InstructorRow};
pub use directory_service_impl::SeaOrmDirectoryService;
pub use instructor_service::{Dashboard, InstructorError, InstructorService, NewSchedule};
pub use instructor_service_impl::SeaOrmInstructorService;
