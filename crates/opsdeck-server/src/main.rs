//! OpsDeck Server — application entry point.

use opsdeck_server::{ServerConfig, build_router};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("opsdeck_server=info".parse().unwrap())
                .add_directive("opsdeck_db=info".parse().unwrap()),
        )
        .json()
        .init();

    info!("Starting OpsDeck server...");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration error");
            std::process::exit(1);
        }
    };

    let manager = match opsdeck_db::DbManager::connect(&config.db).await {
        Ok(manager) => manager,
        Err(e) => {
            error!(error = %e, "Failed to connect to the store");
            std::process::exit(1);
        }
    };

    if let Err(e) = opsdeck_db::run_migrations(manager.client()).await {
        error!(error = %e, "Migrations failed");
        std::process::exit(1);
    }

    if let Err(e) = opsdeck_db::run_bootstrap(manager.client(), &config.bootstrap).await {
        error!(error = %e, "Bootstrap failed");
        std::process::exit(1);
    }

    let state = opsdeck_server::AppState::new(manager.client().clone(), config.auth.clone());
    let app = build_router(state);

    let listener = match TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %config.bind_addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.bind_addr, "OpsDeck server listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }

    info!("OpsDeck server stopped.");
}
