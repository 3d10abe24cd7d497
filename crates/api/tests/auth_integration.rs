//! Integration tests for staff login and session enforcement.
//!
//! Tests cover:
//! - POST /api/auth/login
//! - POST /api/auth/logout
//! - GET /api/auth/session
//! - Session guard on admin and mutation routes

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_app, get_request, get_request_with_auth, json_request, json_request_with_auth,
    parse_response_body, test_config,
};
use serde_json::json;
use shared::password::hash_password;
use tower::ServiceExt;

fn seed_staff(app: &common::TestApp) {
    app.main.seed(
        "users",
        vec![
            json!({"id": 1, "username": "steve", "password": hash_password("diamond_pick").unwrap(),
                   "can_manage_news": true}),
            json!({"id": 2, "username": "alex", "password": "plaintext-legacy"}),
        ],
    );
}

async fn login(app: &common::TestApp, username: &str, password: &str) -> axum::response::Response {
    let request = json_request(
        Method::POST,
        "/api/auth/login",
        json!({"username": username, "password": password}),
    );
    app.router.clone().oneshot(request).await.unwrap()
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_and_rehydrate_session() {
    let app = create_test_app(test_config());
    seed_staff(&app);

    let response = login(&app, "steve", "diamond_pick").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["username"], "steve");
    let token = body["token"].as_str().unwrap().to_string();
    assert!(body["expiresAt"].is_string());

    let response = app
        .router
        .clone()
        .oneshot(get_request_with_auth("/api/auth/session", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        parse_response_body(response).await,
        json!({"authenticated": true, "username": "steve"})
    );
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = create_test_app(test_config());
    seed_staff(&app);

    let response = login(&app, "steve", "wooden_pick").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid username or password");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_is_one_lookup() {
    let app = create_test_app(test_config());
    seed_staff(&app);

    login(&app, "steve", "diamond_pick").await;
    assert_eq!(app.main.request_count(), 1);
}

#[tokio::test]
async fn test_plaintext_stored_password_never_logs_in() {
    let app = create_test_app(test_config());
    seed_staff(&app);

    let response = login(&app, "alex", "plaintext-legacy").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_without_secret_is_refused() {
    let mut config = test_config();
    config.auth.jwt_secret = String::new();
    let app = create_test_app(config);
    seed_staff(&app);

    let response = login(&app, "steve", "diamond_pick").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(app.main.request_count(), 0);
}

#[tokio::test]
async fn test_login_blank_username_is_bad_request() {
    let app = create_test_app(test_config());

    let response = login(&app, "  ", "x").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn test_session_without_token_is_anonymous() {
    let app = create_test_app(test_config());

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/auth/session"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await, json!({"authenticated": false}));
}

#[tokio::test]
async fn test_session_with_bad_token_is_rejected() {
    let app = create_test_app(test_config());

    let response = app
        .router
        .clone()
        .oneshot(get_request_with_auth("/api/auth/session", "not.a.token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_returns_anonymous() {
    let app = create_test_app(test_config());

    let request = json_request(Method::POST, "/api/auth/logout", json!({}));
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await, json!({"authenticated": false}));
}

// =============================================================================
// Enforcement
// =============================================================================

#[tokio::test]
async fn test_open_access_by_default() {
    let app = create_test_app(test_config());

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/admin/users"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_enforced_session_guards_mutations() {
    let mut config = test_config();
    config.auth.enforce_admin_session = true;
    let app = create_test_app(config);
    seed_staff(&app);

    let create = json!({"sectionId": 1, "title": "Annuncio", "content": "Testo"});

    let response = app
        .router
        .clone()
        .oneshot(json_request(Method::POST, "/api/news-create", create.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.main.rows("news").is_empty());

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/admin/users"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // An unserved method is refused before the guard runs.
    let response = app
        .router
        .clone()
        .oneshot(json_request(Method::GET, "/api/user-delete", json!({"id": 1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let response = app
        .router
        .clone()
        .oneshot(json_request(Method::PATCH, "/api/admin/rules", json!({"id": 1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(app.main.request_count(), 0);

    let body = parse_response_body(login(&app, "steve", "diamond_pick").await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .router
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/news-create",
            create,
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.main.rows("news").len(), 1);

    // Public pages stay open.
    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/public/news"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_enforced_guard_checks_login_not_permission_flags() {
    let mut config = test_config();
    config.auth.enforce_admin_session = true;
    let app = create_test_app(config);
    app.main.seed(
        "users",
        vec![json!({"id": 3, "username": "builder", "password": hash_password("cobblestone").unwrap()})],
    );

    let body = parse_response_body(login(&app, "builder", "cobblestone").await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .router
        .clone()
        .oneshot(get_request_with_auth("/api/admin/users", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
