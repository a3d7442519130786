//! quarry-web - Search front end
//!
//! Serves a search page under the configured base path and forwards each
//! query to the configured search backend.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quarry_common::config::{load_config, resolve_config_path};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quarry_web::{build_router, AppState, BackendClient};

/// Command-line arguments for quarry-web
#[derive(Parser, Debug)]
#[command(name = "quarry-web")]
#[command(about = "Search front end for a JSON search backend")]
#[command(version)]
struct Args {
    /// Config file (default: $QUARRY_CONFIG, then ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides [server].host)
    #[arg(long, env = "QUARRY_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides [server].port)
    #[arg(short, long, env = "QUARRY_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config comes first: it carries the default log level
    let config_path = resolve_config_path(args.config.as_deref());
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting quarry-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Configuration: {}", config_path.display());
    info!(
        page_size = config.page_size,
        pagination_steps = config.pagination_steps,
        pagination_bubble = config.pagination_bubble,
        "Search settings"
    );

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let route = config.route_path();
    let backend = BackendClient::new().context("Failed to create backend client")?;
    let state = AppState::new(config, backend);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    let addr = listener.local_addr()?;
    info!("Listening on http://{}{}", addr, route);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving until killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
