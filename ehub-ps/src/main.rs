//! ehub-ps (Prediction Service) - HTTP API for housing price estimates
//!
//! Loads model artifacts once at startup, then serves predictions and
//! vocabulary metadata. Missing or broken artifacts never stop the service;
//! it answers with built-in metadata and a degraded prediction instead.

use anyhow::{Context, Result};
use clap::Parser;
use ehub_common::config::{
    load_toml_config, log_config_source, resolve_config_path, resolve_models_dir,
};
use ehub_ps::{build_router, AppState, ModelLoader, ScorerPreference};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};

/// Command-line arguments for ehub-ps
#[derive(Parser, Debug)]
#[command(name = "ehub-ps")]
#[command(about = "Addis Ababa housing price prediction service")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (default: 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// HTTP port (default: 8000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding model artifacts
    #[arg(short, long)]
    models_dir: Option<PathBuf>,

    /// Artifact format to load: auto, native or linear
    #[arg(short, long, default_value_t = ScorerPreference::Auto)]
    scorer: ScorerPreference,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let config = load_toml_config(&config_path).context("Failed to load config")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .init();

    info!(
        "Starting EthioML Hub Prediction Service (ehub-ps) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    log_config_source(&config_path);

    let models_dir = resolve_models_dir(args.models_dir.as_deref(), &config);
    let model = ModelLoader::new(models_dir, args.scorer).load();

    let app = build_router(AppState::new(model));

    let host = args.host.unwrap_or_else(|| config.host_or_default());
    let port = args.port.unwrap_or_else(|| config.port_or_default());
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("ehub-ps listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
