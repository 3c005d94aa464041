use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use subway_server::cache::CacheConfig;
use subway_server::config::ServerConfig;
use subway_server::network::{NetworkStore, load_network};
use subway_server::planner::{FarePolicy, PathQueryService};
use subway_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Load the seed network, or start with an empty catalog
    let store = match &config.network_path {
        Some(path) => match load_network(path) {
            Ok(store) => store,
            Err(e) => {
                error!(error = %e, "Failed to load network");
                return ExitCode::FAILURE;
            }
        },
        None => {
            info!("No seed network configured, starting empty");
            NetworkStore::new()
        }
    };

    let routes = PathQueryService::new(store, FarePolicy::default(), &CacheConfig::default());
    let state = AppState::new(routes);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.addr, "Subway route server listening");
    info!("  GET  /health                   - Health check");
    info!("  GET  /stations, /lines         - Catalog");
    info!("  GET  /paths?source=&target=    - Shortest path and fare");
    info!("  GET  /favorites/stations|paths - Member favorites");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
