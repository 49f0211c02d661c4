//! Secure CI Demo: secret configuration status service.
//!
//! This is the application entry point. It loads configuration from a TOML
//! file, initializes tracing, builds the application state and router, and
//! serves HTTP until a shutdown signal arrives.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use secure_ci_demo::config::{AppConfig, LogFormat, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use secure_ci_demo::http::start_server;
use secure_ci_demo::{create_router, AppState};

/// Secure CI Demo: reports secret configuration status without revealing it
#[derive(Parser, Debug)]
#[command(name = "secure-ci-demo", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "secure_ci_demo=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Configuration decides the log format, so it loads before tracing starts
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    match config.logging.log_format() {
        Some(LogFormat::Json) => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(config = %args.config, "Loaded configuration");

    // Create application state and router
    let state = AppState::new(config.clone());
    tracing::info!(
        path = %state.secrets.path().display(),
        preview_chars = config.secret.preview_chars,
        "Secret source configured"
    );
    let app = create_router(state);

    start_server(app, &config.http).await?;

    Ok(())
}
