//! Predikit Server
//!
//! Inference server shell that hosts a user-supplied predictor component.
//!
//! At startup the server loads the predictor plugin named on the command
//! line, provisions the serving-platform handles its constructor requests,
//! and exposes the component's capabilities over an OpenAI-style HTTP
//! surface. Any failure during this one-shot sequence aborts startup.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use predikit_host::ProvisionContext;
use predikit_platform::RestPlatform;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

mod config;
mod routes;
mod state;

use config::ServerConfig;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "predikit-server")]
#[command(about = "Inference server hosting a user-supplied predictor component", long_about = None)]
pub struct Cli {
    /// Model name, as assigned by the serving backend
    #[arg(long = "model_name")]
    model_name: String,

    /// Inference protocol used for calling the predictor; only v1 is accepted
    #[arg(long = "api_protocol", default_value = "v1", value_parser = ["v1"])]
    api_protocol: String,

    /// Predictor plugin library implementing the component entry point
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "8080")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting Predikit Server");

    let config = ServerConfig::from_cli(cli);
    info!("Serving model: {}", config.model_name);
    info!("API protocol: {}", config.api_protocol);
    match &config.predictor_file {
        Some(path) => info!("Predictor script: {}", path.display()),
        None => info!("No predictor script supplied"),
    }

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Initialize application state (load and initialize the predictor)
    let platform = RestPlatform::new()?;
    let ctx = ProvisionContext::from_env()?;

    info!("Initializing application state...");
    let state = AppState::initialize(config, &platform, &ctx, metrics_handle).await?;
    info!("Application state initialized successfully");

    let addr: SocketAddr = format!("{}:{}", state.config.listen, state.config.port).parse()?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Graceful shutdown handler
    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("predikit_server=debug,predikit_host=debug,predikit_platform=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "predikit_requests_total",
        "Total number of requests served by endpoint"
    );
    metrics::describe_counter!(
        "predikit_request_errors_total",
        "Total number of failed requests"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
