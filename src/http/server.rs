//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the forwarding handler
//! - Wire up middleware (request tracing)
//! - Serve on a bound listener until shutdown
//!
//! Every path, including `/`, reaches [`gateway_handler`] through the
//! router fallback. The handler does its own path check.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::handler::{gateway_handler, ForwardingHandler};
use crate::http::relay::RelayTracker;
use crate::lifecycle::Shutdown;

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    relays: RelayTracker,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let relays = RelayTracker::new();
        let handler = ForwardingHandler::new(&config, relays.clone());
        let router = Self::build_router(handler);

        Self {
            router,
            config,
            relays,
        }
    }

    fn build_router(handler: ForwardingHandler) -> Router {
        Router::new()
            .fallback(gateway_handler)
            .with_state(handler)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns after `shutdown` is triggered and in-flight requests have
    /// drained.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the gateway without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle onto the in-flight relay count.
    pub fn relays(&self) -> RelayTracker {
        self.relays.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
