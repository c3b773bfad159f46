//! SPA Edge Proxy
//!
//! Serves a pre-built single-page bundle and forwards `/api` to one upstream.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                  EDGE                        │
//!     Client Request      │  ┌─────────┐    ┌──────────┐                 │
//!     ────────────────────┼─▶│  http   │───▶│ routing  │                 │
//!                         │  │ server  │    │  router  │                 │
//!                         │  └─────────┘    └────┬─────┘                 │
//!                         │          ┌───────────┼────────────┐          │
//!                         │          ▼           ▼            ▼          │
//!                         │   ┌────────────┐ ┌────────┐ ┌───────────┐    │
//!                         │   │  service   │ │ static │ │ forwarder │────┼──▶ Upstream API
//!                         │   │  worker    │ │ bundle │ │ rewrite + │    │
//!                         │   │ (no-cache) │ │        │ │ headers   │◀───┼───
//!                         │   └────────────┘ └────────┘ └───────────┘    │
//!                         │                                              │
//!                         │  config · security (CORS) · observability    │
//!                         │  lifecycle (signals, graceful shutdown)      │
//!                         └──────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;

use edge_proxy::config::load_from_env;
use edge_proxy::lifecycle::Shutdown;
use edge_proxy::observability::{logging, metrics};
use edge_proxy::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("edge-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        includes_prefix = config.upstream.includes_prefix,
        rewrite = config.rewrite.enabled,
        "Configuration loaded"
    );

    if let Some(addr) = &config.observability.metrics_address {
        // Validated at load time.
        if let Ok(addr) = addr.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
