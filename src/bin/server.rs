//! PhenoSat HTTP Server Binary
//!
//! This is the main entry point for the coverage REST API server.
//! It initializes the repository, optionally preloads a site catalog, sets up
//! the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default features)
//! cargo run --bin phenosat-server
//!
//! # Preload a catalog and use a custom configuration
//! CONFIG_PATH=config.toml CATALOG_PATH=sites.json \
//!   cargo run --bin phenosat-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `CONFIG_PATH`: Engine configuration TOML (optional; defaults apply)
//! - `CATALOG_PATH`: Site catalog JSON to preload at startup (optional)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use phenosat_rust::config::EngineConfig;
use phenosat_rust::db::repository::SiteRepository;
use phenosat_rust::db::LocalRepository;
use phenosat_rust::http::{create_router, AppState};
use phenosat_rust::models::catalog::parse_catalog_json_str;

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

    info!("Starting PhenoSat HTTP Server");

    // Load engine configuration
    let config = match env::var("CONFIG_PATH") {
        Ok(path) => {
            let config = EngineConfig::from_path(&path)?;
            info!("Loaded engine configuration from {}", path);
            config
        }
        Err(_) => EngineConfig::default(),
    };

    // Initialize repository
    let repository: Arc<dyn SiteRepository> = Arc::new(LocalRepository::new());
    info!("Repository initialized successfully");

    // Optionally preload a site catalog
    if let Ok(path) = env::var("CATALOG_PATH") {
        let raw = std::fs::read_to_string(&path)?;
        let catalog = parse_catalog_json_str(&raw, None)?;
        let summary = repository.store_catalog(catalog).await?;
        info!(
            "Preloaded catalog '{}' ({} sites, {} scenes)",
            summary.name, summary.site_count, summary.scene_count
        );
    }

    // Create application state
    let state = AppState::new(repository, config);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("API documentation: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
