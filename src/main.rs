//! Prolific: a personal company research assistant
//!
//! This is the main entry point for the application.

use anyhow::Result;
use clap::Parser;
use prolific::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prolific: your personal company assistant
#[derive(Parser, Debug)]
#[command(name = "prolific", version, about)]
struct Cli {
    /// Path to a settings.yml file
    #[arg(short, long, env = "PROLIFIC_SETTINGS_PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = config::load(cli.config)?;

    // Initialize logging; RUST_LOG wins over the debug flag
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Prolific v{}", prolific::VERSION);
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    settings.validate()?;
    info!(
        search = %settings.search.base_url,
        model = %settings.llm.model,
        "Providers configured"
    );

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Create application state
    let state = AppState::new(settings.clone(), client)?;
    info!("Application state initialized");

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
