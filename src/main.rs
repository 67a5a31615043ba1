//! NLC website server.
//!
//! # Architecture Overview
//!
//! ```text
//!   environment ──▶ config::validate ──▶ Arc<AppConfig>
//!                        │                    │
//!                        ▼                    ▼
//!                 stderr + exit(1)     ┌──────────────────────────────┐
//!                                      │          HttpServer          │
//!     Client Request                   │  request id → trace → timeout│
//!     ─────────────────────────────────┼─▶ /            public home   │
//!                                      │   /admin       admin home    │
//!     Client Response                  │   /api/health  status JSON   │
//!     ◀────────────────────────────────┼── security headers           │
//!                                      └──────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use nlc_website::config::schema::{DEFAULT_BIND_ADDRESS, DEFAULT_REQUEST_TIMEOUT_SECS};
use nlc_website::config::{self, RuntimeMode, ServerSettings};
use nlc_website::lifecycle::{signals, startup, Shutdown};
use nlc_website::observability::logging::{self, LogFormat, DEFAULT_FILTER};
use nlc_website::observability::metrics;
use nlc_website::HttpServer;

#[derive(Parser)]
#[command(name = "nlc-website", version)]
#[command(about = "NLC public site and admin portal", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,

    /// Request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    /// Serve Prometheus metrics on this address
    #[arg(long, env = "METRICS_ADDRESS")]
    metrics_address: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Validation is pure, so it runs before logging to pick the log format.
    let validated = config::load_from_env();
    let mode = validated
        .as_ref()
        .map(|config| config.runtime_mode())
        .unwrap_or(RuntimeMode::Development);
    logging::init(LogFormat::for_mode(mode), DEFAULT_FILTER);

    let config = match validated {
        Ok(config) => Arc::new(config),
        Err(failure) => startup::fail_startup(&failure),
    };

    tracing::info!(
        runtime_mode = %config.runtime_mode(),
        public_app_url = %config.public_app_url(),
        "Configuration loaded"
    );

    let settings = ServerSettings {
        bind_address: cli.bind,
        request_timeout_secs: cli.request_timeout_secs,
        metrics_address: cli.metrics_address,
    };

    if let Some(addr) = settings.metrics_address {
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(metrics_address = %addr, error = %e, "Failed to start metrics exporter");
        }
    }

    let listener = TcpListener::bind(&settings.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config, settings).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
