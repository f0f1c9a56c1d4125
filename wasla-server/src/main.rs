use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use wasla_server::config::ServerConfig;
use wasla_server::directory::{CentralServerClient, InMemoryDirectory};
use wasla_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wasla_server=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Pick the station directory: a local file for offline work, otherwise
    // the Central Server.
    let state = match &config.stations_file {
        Some(path) => match InMemoryDirectory::from_json_file(path) {
            Ok(directory) => {
                tracing::info!(
                    path = %path.display(),
                    stations = directory.len(),
                    "serving stations from file"
                );
                AppState::new(directory, config.nearest.clone())
            }
            Err(e) => {
                tracing::error!("failed to load stations: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => match CentralServerClient::new(config.central_server.clone()) {
            Ok(client) => {
                tracing::info!(
                    url = %config.central_server.base_url,
                    timeout = ?config.central_server.timeout,
                    "using Central Server station directory"
                );
                AppState::new(client, config.nearest.clone())
            }
            Err(e) => {
                tracing::error!("failed to create Central Server client: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %config.bind_addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Wasla station server listening on http://{}", config.bind_addr);
    tracing::info!("  GET  /health                  - Health check");
    tracing::info!("  GET  /api/v1/stations/nearest - Nearest stations (?lat=&lng=&limit=)");
    tracing::info!("  POST /api/v1/stations/nearest - Nearest stations (JSON body)");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
