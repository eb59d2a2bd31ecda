use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::models::{Identity, Role};

/// Session key carrying the authenticated identity.
const IDENTITY_KEY: &str = "identity";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Session gate for protected routes: the session must carry an
/// identity established by a prior login.
pub async fn auth_middleware(
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(Some(identity)) = session.get::<Identity>(IDENTITY_KEY).await {
        tracing::Span::current().record("user_id", identity.user_id);
        return Ok(next.run(request).await);
    }

    let response = (StatusCode::UNAUTHORIZED, "Unauthorized");
    Ok(response.into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Authenticate with username and password, establishes the session
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<Identity>>, ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let identity = state
        .auth_service
        .authenticate(&payload.username, &payload.password)
        .await?;

    if let Err(e) = session.insert(IDENTITY_KEY, &identity).await {
        return Err(ApiError::internal(format!("Failed to create session: {e}")));
    }

    tracing::info!(user_id = identity.user_id, "User logged in");

    Ok(Json(ApiResponse::success(identity)))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> Json<ApiResponse<MessageResponse>> {
    let _ = session.flush().await;
    Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    }))
}

/// GET /auth/me
/// Get the identity for the current session
pub async fn get_current_user(
    session: Session,
) -> Result<Json<ApiResponse<Identity>>, ApiError> {
    let identity = require_identity(&session).await?;
    Ok(Json(ApiResponse::success(identity)))
}

// ============================================================================
// Helpers
// ============================================================================

/// Get the identity from the session, returns error if not authenticated
pub async fn require_identity(session: &Session) -> Result<Identity, ApiError> {
    session
        .get::<Identity>(IDENTITY_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}

/// Role check. Denial is a notice-level outcome, never an internal
/// error, and must not reveal whether the requested resource exists.
pub fn require_role(identity: &Identity, role: Role) -> Result<(), ApiError> {
    if identity.role() == Some(role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Access denied".to_string()))
    }
}
