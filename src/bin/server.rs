//! Sun & Moon Datasource HTTP Server Binary
//!
//! Entry point for the datasource REST API server. It loads the observer
//! configuration, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! SUNMOON_LATITUDE=48.1 SUNMOON_LONGITUDE=11.6 cargo run --bin sunmoon-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `SUNMOON_CONFIG`: Path to a TOML file with `latitude`/`longitude`
//! - `SUNMOON_LATITUDE` / `SUNMOON_LONGITUDE`: Observer location (used when
//!   no config file is named; defaults to Greenwich)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sunmoon_datasource::http::{create_router, AppState};
use sunmoon_datasource::models::DatasourceConfig;
use sunmoon_datasource::services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting Sun & Moon datasource server");

    let config = DatasourceConfig::load()?;
    let health = services::health_check(&config);
    info!(
        "Configured location: lat {}, lon {} ({})",
        config.latitude, config.longitude, health.message
    );

    // Create application state and router
    let state = AppState::new(config);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
