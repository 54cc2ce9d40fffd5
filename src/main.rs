//! Cat API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ http::server (axum router, request ID, access log)
//!                        │
//!                        ▼
//!                    http::handlers (validate, default sub_id, build OutboundRequest)
//!                        │
//!                        ▼
//!                    dispatch::Dispatcher::submit ──spawn──▶ upstream call (reqwest)
//!                        │                                         │
//!                        ▼                                         ▼
//!                    resilience::timeouts  ◀──── CompletionChannel (one Outcome)
//!                        │
//!                        ▼
//!     ◀───────────── http::response (outcome bytes or {"error": ...}, HTTP 200)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cat_gateway::config::loader;
use cat_gateway::http::HttpServer;
use cat_gateway::lifecycle::Shutdown;
use cat_gateway::net::tls::load_tls_config;
use cat_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "cat-gateway")]
#[command(about = "REST gateway in front of The Cat API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = loader::load(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("cat-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_base_url = %config.upstream.api_base_url,
        request_timeout_secs = config.upstream.request_timeout_secs,
        tls = config.listener.tls.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let tls = config.listener.tls.clone();
    let server = HttpServer::new(config)?;

    match tls {
        Some(tls) => {
            let rustls = load_tls_config(&tls).await?;
            server.run_tls(rustls, shutdown.subscribe()).await?;
        }
        None => {
            let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");
            server.run(listener, shutdown.subscribe()).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
