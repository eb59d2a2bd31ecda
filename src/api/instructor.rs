use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, DashboardResponse, MessageResponse, auth};
use crate::models::Role;
use crate::services::NewSchedule;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct AddScheduleRequest {
    pub schedule_type: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /instructor/dashboard
/// Own profile, schedules and recent activity. Instructor role only.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let identity = auth::require_identity(&session).await?;
    auth::require_role(&identity, Role::Instructor)?;

    let dashboard = state.instructor_service.dashboard(identity.user_id).await?;

    Ok(Json(ApiResponse::success(DashboardResponse {
        instructor_id: dashboard.instructor_id,
        full_name: identity.full_name,
        status: dashboard.status,
        department: dashboard.department,
        schedules: dashboard.schedules,
        activity: dashboard.activity,
    })))
}

/// PUT /instructor/status
/// Change own availability status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let identity = auth::require_identity(&session).await?;
    auth::require_role(&identity, Role::Instructor)?;

    state
        .instructor_service
        .set_status(identity.user_id, &payload.status)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: format!("Status updated to {}.", payload.status),
    })))
}

/// POST /instructor/schedules
/// Register a planned leave or travel
pub async fn add_schedule(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<AddScheduleRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let identity = auth::require_identity(&session).await?;
    auth::require_role(&identity, Role::Instructor)?;

    let schedule = state
        .instructor_service
        .schedule_absence(
            identity.user_id,
            NewSchedule {
                schedule_type: payload.schedule_type,
                start_date: payload.start_date,
                end_date: payload.end_date,
                reason: payload.reason,
            },
        )
        .await?;

    // Mirror the capitalized type in the success notice.
    let title = {
        let mut chars = schedule.schedule_type.chars();
        chars.next().map_or_else(String::new, |c| {
            c.to_uppercase().collect::<String>() + chars.as_str()
        })
    };

    Ok(Json(ApiResponse::success(MessageResponse {
        message: format!("{title} scheduled successfully."),
    })))
}
