use anyhow::Result;
use tracing::info;

use persistence::db::{create_databases, create_memory_databases};
use portal_api::{
    app,
    config::{self, BackendKind},
    middleware,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;
    config.validate()?;

    middleware::init_logging(&config.logging)?;
    middleware::init_metrics()?;

    info!("Starting Realm Portal API v{}", env!("CARGO_PKG_VERSION"));

    let databases = match config.databases.backend {
        BackendKind::Rest => {
            create_databases(&config.databases.main(), &config.databases.other())?
        }
        BackendKind::Memory => {
            info!("Using in-memory tables; data is lost on restart");
            create_memory_databases().0
        }
    };

    let addr = config.socket_addr()?;
    let app = app::create_app(config, databases);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
