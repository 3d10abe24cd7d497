//! Common test utilities for integration tests.
//!
//! The app runs over in-memory tables so tests can seed rows, inject backend
//! failures and count backend requests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use persistence::{db::create_memory_databases, memory::MemoryTransport};
use portal_api::{
    app::create_app,
    config::{
        AuthConfig, BackendKind, Config, DatabasesConfig, LoggingConfig, SecurityConfig,
        ServerConfig, SiteConfig,
    },
};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Test configuration with sessions enabled but not enforced.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
            max_body_size: 1048576,
        },
        databases: DatabasesConfig {
            backend: BackendKind::Memory,
            request_timeout_secs: 5,
            main: Default::default(),
            other: Default::default(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig::default(),
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            session_expiry_secs: 3600,
            leeway_secs: 0,
            enforce_admin_session: false,
        },
        site: SiteConfig {
            support_url: Some("https://discord.gg/realm".to_string()),
        },
    }
}

/// The router plus the `main` and `other` tables behind it.
pub struct TestApp {
    pub router: Router,
    pub main: Arc<MemoryTransport>,
    pub other: Arc<MemoryTransport>,
}

pub fn create_test_app(config: Config) -> TestApp {
    let (databases, main, other) = create_memory_databases();
    TestApp {
        router: create_app(config, databases),
        main,
        other,
    }
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn json_request_with_auth(
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}
