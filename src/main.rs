//! SIMA Gateway
//!
//! Forwards every request path except `/` to the upstream API and relays the
//! answer back.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                   GATEWAY :8081              │
//!   Client Request    │  ┌─────────┐    ┌───────────┐                │
//!  ───────────────────┼─▶│  axum   │───▶│ forwarding│── "/" ──▶ 200  │
//!                     │  │ server  │    │  handler  │                │
//!                     │  └─────────┘    └─────┬─────┘                │
//!                     │                       │ GET API_URL + path   │
//!                     │                       ▼                      │
//!   Client Response   │  ┌─────────┐    ┌───────────┐                │
//!  ◀──────────────────┼──│  relay  │◀───│ upstream  │◀───────────────┼──── API
//!                     │  │  body   │    │  client   │                │
//!                     │  └─────────┘    └───────────┘                │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tokio::net::TcpListener;

use sima_gateway::config::{load_config, validate_config};
use sima_gateway::lifecycle::shutdown_signal;
use sima_gateway::observability::init_logging;
use sima_gateway::{HttpServer, Shutdown};

/// How long in-flight requests may drain after a shutdown signal.
const DRAIN_DEADLINE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();

    init_logging(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sima-gateway starting");

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::warn!(%error, "Upstream base looks wrong; requests will likely fail with 502");
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        upstream = %config.upstream.base_url,
        "Gateway on :{} -> {}",
        local_addr.port(),
        config.upstream.base_url
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.clone()));

    tokio::select! {
        result = &mut server_task => {
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    shutdown.trigger();

    match tokio::time::timeout(DRAIN_DEADLINE, server_task).await {
        Ok(result) => result??,
        Err(_) => tracing::warn!(
            deadline_secs = DRAIN_DEADLINE.as_secs(),
            "Requests still in flight at drain deadline, exiting"
        ),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
