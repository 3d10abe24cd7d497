//! Integration tests for staff user management.
//!
//! Tests cover:
//! - PUT /api/user-update (sparse, password hashing)
//! - DELETE /api/user-delete
//! - GET|POST /api/admin/users

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_app, get_request, json_request, parse_response_body, test_config};
use serde_json::json;
use shared::password::{is_password_hash, verify_password};
use tower::ServiceExt;

fn seed_users(app: &common::TestApp) {
    app.main.seed(
        "users",
        vec![
            json!({"id": 1, "username": "steve", "password": "$argon2id$placeholder",
                   "can_manage_news": true, "can_manage_rules": true}),
            json!({"id": 2, "username": "alex", "password": "$argon2id$placeholder"}),
        ],
    );
}

#[tokio::test]
async fn test_update_user_hashes_password() {
    let app = create_test_app(test_config());
    seed_users(&app);

    let request = json_request(
        Method::PUT,
        "/api/user-update",
        json!({"id": 2, "password": "nuova-password-sicura"}),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await, json!({"success": true}));

    let row = &app.main.rows("users")[1];
    let stored = row["password"].as_str().unwrap();
    assert!(is_password_hash(stored));
    assert!(verify_password("nuova-password-sicura", stored).unwrap());
    assert_eq!(row["username"], "alex");
}

#[tokio::test]
async fn test_update_user_permissions_only() {
    let app = create_test_app(test_config());
    seed_users(&app);

    let request = json_request(
        Method::PUT,
        "/api/user-update",
        json!({"id": 1, "permissions": {"canManageStore": true}}),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let row = &app.main.rows("users")[0];
    assert_eq!(row["can_manage_store"], true);
    assert_eq!(row["can_manage_news"], false);
    assert_eq!(row["password"], "$argon2id$placeholder");
}

#[tokio::test]
async fn test_update_user_short_password_rejected() {
    let app = create_test_app(test_config());
    seed_users(&app);

    let request = json_request(
        Method::PUT,
        "/api/user-update",
        json!({"id": 1, "password": "corta"}),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.main.request_count(), 0);
}

#[tokio::test]
async fn test_update_unknown_user_is_404() {
    let app = create_test_app(test_config());
    seed_users(&app);

    let request = json_request(
        Method::PUT,
        "/api/user-update",
        json!({"id": 99, "username": "herobrine"}),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_delete_user() {
    let app = create_test_app(test_config());
    seed_users(&app);

    let request = json_request(Method::DELETE, "/api/user-delete", json!({"id": 2}));
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.main.rows("users").len(), 1);

    let request = json_request(Method::POST, "/api/user-delete", json!({"id": 1}));
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(app.main.rows("users").len(), 1);
}

#[tokio::test]
async fn test_admin_user_list_hides_passwords() {
    let app = create_test_app(test_config());
    seed_users(&app);

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/admin/users"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("password").is_none());
    }
    // Listed by username.
    let names: Vec<&str> = users.iter().filter_map(|u| u["username"].as_str()).collect();
    assert_eq!(names, vec!["alex", "steve"]);
    assert_eq!(users[0]["canManageNews"], false);
    assert_eq!(users[1]["canManageNews"], true);
    assert_eq!(users[1]["canManageRules"], true);
}

#[tokio::test]
async fn test_admin_create_user() {
    let app = create_test_app(test_config());

    let request = json_request(
        Method::POST,
        "/api/admin/users",
        json!({"username": "notch", "password": "password-lunga", "permissions": {"canManageUsers": true}}),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["username"], "notch");
    assert!(body.get("password").is_none());

    let row = &app.main.rows("users")[0];
    assert!(is_password_hash(row["password"].as_str().unwrap()));
    assert_eq!(row["can_manage_users"], true);
}

#[tokio::test]
async fn test_created_user_can_log_in() {
    use fake::faker::internet::en::{Password, Username};
    use fake::Fake;

    let app = create_test_app(test_config());
    let username: String = Username().fake();
    let password: String = Password(12..24).fake();

    let request = json_request(
        Method::POST,
        "/api/admin/users",
        json!({"username": username, "password": password}),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = json_request(
        Method::POST,
        "/api/auth/login",
        json!({"username": username, "password": password}),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["username"], username);
}
