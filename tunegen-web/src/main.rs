//! TUNEGEN web service - Main entry point
//!
//! Recommends songs for a user-selected mood or an image-derived
//! location, backed by the Last.fm tag API and a local SQLite store.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use tunegen_common::config;
use tunegen_common::db::init::init_database;
use tunegen_web::classifier::RandomClassifier;
use tunegen_web::lastfm::LastFmClient;
use tunegen_web::{build_router, AppState};

/// Command-line arguments for tunegen-web
#[derive(Parser, Debug)]
#[command(name = "tunegen-web")]
#[command(about = "Mood and location based song recommendation service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "TUNEGEN_PORT")]
    port: u16,

    /// Root folder holding the tunegen database
    #[arg(short, long, env = "TUNEGEN_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Last.fm API key
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    api_key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting TUNEGEN web service v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // 4-tier resolution: CLI arg > env var > config file > OS default
    let root_folder =
        config::resolve_root_folder(args.root_folder.as_deref(), "TUNEGEN_ROOT_FOLDER");
    let db_path = config::ensure_root_folder(&root_folder)
        .context("Failed to create root folder")?;
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    // Create application state and router
    let state = AppState::new(
        pool,
        Arc::new(LastFmClient::new(args.api_key)),
        Arc::new(RandomClassifier),
    );
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("tunegen-web listening on http://{}", addr);
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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
