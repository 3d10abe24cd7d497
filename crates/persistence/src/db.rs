//! Connection setup for the two hosted databases.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::client::{DataClient, Databases};
use crate::error::DataError;
use crate::memory::MemoryTransport;
use crate::transport::{HttpTransport, Transport, UnconfiguredTransport};

/// Where one logical database lives.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub url: String,
    pub key: String,
    pub request_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty() && !self.key.trim().is_empty()
    }
}

/// Builds a REST client, or an unconfigured one when URL or key is missing.
pub fn create_client(name: &'static str, config: &DatabaseConfig) -> Result<DataClient, DataError> {
    let transport: Arc<dyn Transport> = if config.is_complete() {
        info!(database = name, url = %config.url, "Connecting to hosted database");
        Arc::new(HttpTransport::new(
            &config.url,
            &config.key,
            Duration::from_secs(config.request_timeout_secs.max(1)),
        )?)
    } else {
        warn!(
            database = name,
            "Database URL or key missing; reads will be empty and writes will be skipped"
        );
        Arc::new(UnconfiguredTransport)
    };
    Ok(DataClient::new(name, transport))
}

/// Clients for the `main` and `other` databases over REST.
pub fn create_databases(
    main: &DatabaseConfig,
    other: &DatabaseConfig,
) -> Result<Databases, DataError> {
    Ok(Databases {
        main: create_client("main", main)?,
        other: create_client("other", other)?,
    })
}

/// Both databases backed by in-process tables.
///
/// Returns the transports so callers can seed or inspect them.
pub fn create_memory_databases() -> (Databases, Arc<MemoryTransport>, Arc<MemoryTransport>) {
    let main = Arc::new(MemoryTransport::new());
    let other = Arc::new(MemoryTransport::new());
    let databases = Databases {
        main: DataClient::new("main", main.clone()),
        other: DataClient::new("other", other.clone()),
    };
    (databases, main, other)
}
