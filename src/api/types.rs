use serde::Serialize;

use crate::entities::{activity_log, departments, schedules};
use crate::services::InstructorRow;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DepartmentDetailResponse {
    pub department: departments::Model,
    pub instructors: Vec<InstructorRow>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub instructor_id: i32,
    pub full_name: String,
    pub status: String,
    pub department: departments::Model,
    pub schedules: Vec<schedules::Model>,
    pub activity: Vec<activity_log::Model>,
}
