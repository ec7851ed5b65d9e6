//! Argus Configuration Composer Entry Point
//!
//! Validates the environment-supplied parameters, rebuilds both agent
//! configuration documents from their baselines, then serves them
//! read-only. Core functionality is provided by the `argus_config` library
//! crate.

use argus_config::{
    DocumentPaths, RawParams, ValidatedParams, compose,
    server::{AppState, create_router},
};
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Argus - monitoring agent configuration composer
#[derive(Parser, Debug)]
#[command(name = "argus-config", version, about, long_about = None)]
struct Cli {
    /// Ingestion token (32 mixed-case letters)
    #[arg(long, env = "ARGUS_TOKEN")]
    token: String,

    /// Listener region code (au, ca, eu, nl, uk, us, wa; empty for default)
    #[arg(long, env = "ARGUS_LISTENER_REGION", default_value = "")]
    listener_region: String,

    /// Scrape interval in seconds (positive multiple of 60)
    #[arg(long, env = "SCRAPE_INTERVAL", default_value = "300")]
    scrape_interval: String,

    /// Dataset label attached to every forwarded metric
    #[arg(long, env = "DATASET_LABEL")]
    dataset_label: String,

    /// AWS region to scrape
    #[arg(long, env = "AWS_DEFAULT_REGION")]
    aws_region: String,

    /// Comma-separated namespace selection (e.g. "AWS/EC2,AWS/RDS")
    #[arg(long, env = "AWS_NAMESPACES")]
    namespaces: String,

    /// Custom listener URL, used verbatim instead of the derived endpoint
    #[arg(long, env = "CUSTOM_LISTENER")]
    custom_listener: Option<String>,

    /// Custom cloudwatch-exporter document replacing the generated one
    #[arg(long, env = "CUSTOM_CONFIG_PATH")]
    custom_config: Option<String>,

    /// Comma-separated enabled-module list (default: all modules)
    #[arg(long, env = "ARGUS_MODULES")]
    modules: Option<String>,

    /// Directory of the live configuration documents
    #[arg(long, env = "ARGUS_CONFIGURATION_DIR", default_value = "configuration")]
    configuration_dir: String,

    /// Directory of the pristine baseline templates
    #[arg(long, env = "ARGUS_BASELINE_DIR", default_value = "baseline")]
    baseline_dir: String,

    /// Directory of the per-namespace metric catalog
    #[arg(long, env = "ARGUS_NAMESPACES_DIR", default_value = "namespaces")]
    namespaces_dir: String,

    /// Server bind address
    #[arg(long, env = "ARGUS_SERVER_BIND", default_value = "0.0.0.0")]
    server_bind: String,

    /// Server port
    #[arg(long, env = "ARGUS_SERVER_PORT", default_value_t = 5001)]
    server_port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,argus_config=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Argus - monitoring agent configuration composer");

    let cli = Cli::parse();

    let raw = RawParams {
        token: cli.token,
        region_code: cli.listener_region,
        scrape_interval: cli.scrape_interval,
        dataset_label: cli.dataset_label,
        aws_region: cli.aws_region,
        namespaces: cli.namespaces,
        custom_listener: cli.custom_listener,
        custom_config_path: cli.custom_config,
        modules: cli.modules,
    };

    let params = ValidatedParams::from_raw(&raw)?;
    if !params.namespaces.unsupported.is_empty() {
        tracing::warn!(
            namespaces = ?params.namespaces.unsupported,
            "Unsupported namespaces will not be scraped"
        );
    }

    let paths = DocumentPaths::new(&cli.configuration_dir, &cli.baseline_dir, &cli.namespaces_dir);

    compose::run(&params, &paths)?;
    tracing::info!("Configuration documents ready");

    let state = AppState {
        paths: paths.clone(),
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.server_bind, cli.server_port).parse()?;
    tracing::info!("Configuration server listening on: http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Setup graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal");
        }
    }
}
