//! Health check endpoint handlers.

use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use persistence::DataClient;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub databases: Vec<DatabaseHealth>,
}

/// Reachability of one logical database.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub name: String,
    pub configured: bool,
    pub connected: bool,
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Simple status response for liveness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Smallest read that proves the backend answers for `table`.
async fn probe(client: &DataClient, table: &str) -> DatabaseHealth {
    if !client.is_configured() {
        return DatabaseHealth {
            name: client.name().to_string(),
            configured: false,
            connected: false,
            latency_ms: None,
            error: None,
        };
    }

    let start = Instant::now();
    let result = client.from(table).select("id").limit(1).execute().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    DatabaseHealth {
        name: client.name().to_string(),
        configured: true,
        connected: result.is_ok(),
        latency_ms: result.is_ok().then_some(latency_ms),
        error: result.err().map(|e| e.to_string()),
    }
}

/// Overall status: unreachable configured databases make the service
/// unhealthy, missing configuration only degrades it.
pub fn overall_status(databases: &[DatabaseHealth]) -> &'static str {
    if databases.iter().any(|d| d.configured && !d.connected) {
        "unhealthy"
    } else if databases.iter().any(|d| !d.configured) {
        "degraded"
    } else {
        "healthy"
    }
}

/// Full health check: probes both databases concurrently.
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let (main, other) = tokio::join!(
        probe(&state.databases.main, "info"),
        probe(&state.databases.other, "store_sections"),
    );
    let databases = vec![main, other];
    let status = overall_status(&databases);

    let code = if status == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            databases,
        }),
    )
}

/// Liveness probe endpoint.
///
/// Returns 200 OK if the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(configured: bool, connected: bool) -> DatabaseHealth {
        DatabaseHealth {
            name: "main".to_string(),
            configured,
            connected,
            latency_ms: connected.then_some(4),
            error: None,
        }
    }

    #[test]
    fn test_overall_status() {
        assert_eq!(overall_status(&[db(true, true), db(true, true)]), "healthy");
        assert_eq!(overall_status(&[db(true, true), db(false, false)]), "degraded");
        assert_eq!(overall_status(&[db(true, false), db(false, false)]), "unhealthy");
    }

    #[test]
    fn test_database_health_serialization() {
        let json = serde_json::to_string(&db(true, true)).unwrap();
        assert!(json.contains("\"latency_ms\":4"));
        assert!(!json.contains("\"error\""));
    }

    #[tokio::test]
    async fn test_probe_unconfigured_client() {
        let client = DataClient::new(
            "other",
            std::sync::Arc::new(persistence::transport::UnconfiguredTransport),
        );
        let health = probe(&client, "store_sections").await;
        assert!(!health.configured);
        assert!(!health.connected);
        assert_eq!(health.name, "other");
    }
}
