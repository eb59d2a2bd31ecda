use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, DepartmentDetailResponse, auth};
use crate::entities::departments;

/// GET /departments
/// All departments, name ascending. Open to any authenticated role.
pub async fn list_departments(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<departments::Model>>>, ApiError> {
    auth::require_identity(&session).await?;

    let departments = state.directory_service.list_departments().await?;
    Ok(Json(ApiResponse::success(departments)))
}

/// GET /departments/{id}
/// Department with its instructors sorted by full name
pub async fn department_detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(department_id): Path<i32>,
) -> Result<Json<ApiResponse<DepartmentDetailResponse>>, ApiError> {
    auth::require_identity(&session).await?;

    let detail = state
        .directory_service
        .department_detail(department_id)
        .await?;

    Ok(Json(ApiResponse::success(DepartmentDetailResponse {
        department: detail.department,
        instructors: detail.instructors,
    })))
}
