use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, DirectoryService, InstructorService, SeaOrmAuthService, SeaOrmDirectoryService,
    SeaOrmInstructorService,
};

pub mod auth;
mod directory;
mod error;
mod instructor;
mod types;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub directory_service: Arc<dyn DirectoryService>,

    pub instructor_service: Arc<dyn InstructorService>,
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let auth_service =
        Arc::new(SeaOrmAuthService::new(store.clone())) as Arc<dyn AuthService + 'static>;
    let directory_service =
        Arc::new(SeaOrmDirectoryService::new(store.clone())) as Arc<dyn DirectoryService + 'static>;
    let instructor_service = Arc::new(SeaOrmInstructorService::new(store.clone()))
        as Arc<dyn InstructorService + 'static>;

    Ok(Arc::new(AppState {
        config,
        store,
        auth_service,
        directory_service,
        instructor_service,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.server.session_inactivity_minutes,
        )));

    let api_router = Router::new()
        .merge(create_protected_router())
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .layer(session_layer)
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/departments", get(directory::list_departments))
        .route("/departments/{id}", get(directory::department_detail))
        .route("/instructor/dashboard", get(instructor::get_dashboard))
        .route("/instructor/status", put(instructor::update_status))
        .route("/instructor/schedules", post(instructor::add_schedule))
        .route_layer(middleware::from_fn(auth::auth_middleware))
}
