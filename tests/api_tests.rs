use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use facultydesk::config::Config;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // In-memory sqlite: every pooled connection is a separate database,
    // so the pool must stay at a single connection.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.server.secure_cookies = false;

    let state = facultydesk::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    facultydesk::api::router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Log in as a seeded demo account and return the session cookie.
async fn login(app: &Router, username: &str, password: &str) -> String {
    let payload = serde_json::json!({ "username": username, "password": password });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, cookie: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn protected_routes_require_session() {
    let app = spawn_app().await;

    for uri in [
        "/api/auth/me",
        "/api/departments",
        "/api/departments/1",
        "/api/instructor/dashboard",
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let app = spawn_app().await;

    // Wrong password for an existing user and a nonexistent user must
    // produce identical outcomes.
    let mut messages = Vec::new();
    for (username, password) in [("jdoe", "wrong"), ("nosuchuser", "password")] {
        let payload = serde_json::json!({ "username": username, "password": password });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        messages.push(body_json(response).await["error"].clone());
    }

    assert_eq!(messages[0], messages[1]);
}

#[tokio::test]
async fn login_establishes_identity() {
    let app = spawn_app().await;
    let cookie = login(&app, "jdoe", "password").await;

    let response = app.clone().oneshot(get("/api/auth/me", &cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["full_name"], "John Doe");
    assert_eq!(body["data"]["role"], "instructor");
}

#[tokio::test]
async fn logout_invalidates_session() {
    let app = spawn_app().await;
    let cookie = login(&app, "jdoe", "password").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/auth/me", &cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn departments_sorted_by_name() {
    let app = spawn_app().await;
    let cookie = login(&app, "student", "password").await;

    let response = app.clone().oneshot(get("/api/departments", &cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();

    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 5);
}

#[tokio::test]
async fn department_detail_lists_instructors_alphabetically() {
    let app = spawn_app().await;
    let cookie = login(&app, "student", "password").await;

    let response = app.clone().oneshot(get("/api/departments/1", &cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["department"]["code"], "CCS");

    let instructors = body["data"]["instructors"].as_array().unwrap();
    assert_eq!(instructors.len(), 2);
    // "Anna Smith" sorts before "John Doe" despite being seeded second
    assert_eq!(instructors[0]["full_name"], "Anna Smith");
    assert_eq!(instructors[0]["status"], "Out");
    assert_eq!(instructors[1]["full_name"], "John Doe");
    assert_eq!(instructors[1]["status"], "In");
}

#[tokio::test]
async fn unknown_department_is_a_recoverable_not_found() {
    let app = spawn_app().await;
    let cookie = login(&app, "student", "password").await;

    let response = app.clone().oneshot(get("/api/departments/999", &cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Department not found");
}

#[tokio::test]
async fn students_are_denied_instructor_operations() {
    let app = spawn_app().await;
    let cookie = login(&app, "student", "password").await;

    let response = app
        .clone()
        .oneshot(get("/api/instructor/dashboard", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Access denied");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/instructor/status",
            &cookie,
            &serde_json::json!({ "status": "Out" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/instructor/schedules",
            &cookie,
            &serde_json::json!({
                "schedule_type": "leave",
                "start_date": "2026-03-01",
                "end_date": "2026-03-05"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn dashboard_shows_profile_and_activity() {
    let app = spawn_app().await;
    let cookie = login(&app, "jdoe", "password").await;

    let response = app
        .clone()
        .oneshot(get("/api/instructor/dashboard", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["full_name"], "John Doe");
    assert_eq!(body["data"]["status"], "In");
    assert_eq!(body["data"]["department"]["code"], "CCS");

    // Seeding leaves one "Status set" entry behind.
    let activity = body["data"]["activity"].as_array().unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0]["action"], "Status set");
}

#[tokio::test]
async fn status_change_updates_dashboard_and_logs() {
    let app = spawn_app().await;
    let cookie = login(&app, "jdoe", "password").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/instructor/status",
            &cookie,
            &serde_json::json!({ "status": "Out" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["message"], "Status updated to Out.");

    let response = app
        .clone()
        .oneshot(get("/api/instructor/dashboard", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["data"]["status"], "Out");
    let activity = body["data"]["activity"].as_array().unwrap();
    assert_eq!(activity[0]["action"], "Status changed");
    assert_eq!(activity[0]["details"], "Changed from In to Out");
}

#[tokio::test]
async fn invalid_status_is_rejected_without_effect() {
    let app = spawn_app().await;
    let cookie = login(&app, "jdoe", "password").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/instructor/status",
            &cookie,
            &serde_json::json!({ "status": "Sick" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get("/api/instructor/dashboard", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "In");
    assert_eq!(body["data"]["activity"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn scheduling_leave_overwrites_status() {
    let app = spawn_app().await;
    let cookie = login(&app, "asmith", "password").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/instructor/schedules",
            &cookie,
            &serde_json::json!({
                "schedule_type": "leave",
                "start_date": "2026-03-01",
                "end_date": "2026-03-05",
                "reason": "Personal leave"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["message"], "Leave scheduled successfully.");

    let response = app
        .clone()
        .oneshot(get("/api/instructor/dashboard", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;

    // asmith was seeded as "Out"; the schedule overwrites it.
    assert_eq!(body["data"]["status"], "On Leave");

    let schedules = body["data"]["schedules"].as_array().unwrap();
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0]["schedule_type"], "leave");
    assert_eq!(schedules[0]["start_date"], "2026-03-01");
    assert_eq!(schedules[0]["reason"], "Personal leave");

    let activity = body["data"]["activity"].as_array().unwrap();
    assert_eq!(activity[0]["action"], "Scheduled leave");
    assert_eq!(
        activity[0]["details"],
        "Leave from 2026-03-01 to 2026-03-05: Personal leave"
    );
}

#[tokio::test]
async fn schedule_validation_failures_leave_no_trace() {
    let app = spawn_app().await;
    let cookie = login(&app, "jdoe", "password").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/instructor/schedules",
            &cookie,
            &serde_json::json!({
                "schedule_type": "vacation",
                "start_date": "2026-03-01",
                "end_date": "2026-03-05"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/instructor/schedules",
            &cookie,
            &serde_json::json!({
                "schedule_type": "travel",
                "start_date": "",
                "end_date": "2026-03-05"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get("/api/instructor/dashboard", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "In");
    assert!(body["data"]["schedules"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["activity"].as_array().unwrap().len(), 1);
}
