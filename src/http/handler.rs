//! The forwarding handler.
//!
//! ```text
//! inbound request
//!     → path == "/"  → 200 "SIMA Gateway up"
//!     → otherwise    → GET base + path
//!                        → Ok  → relay status, first-value headers, body
//!                        → Err → 502, error description as body
//! ```

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
};

use crate::config::GatewayConfig;
use crate::http::relay::RelayTracker;
use crate::http::response::relay_response;
use crate::upstream::UpstreamClient;

/// Body returned for the root path.
pub const GREETING: &str = "SIMA Gateway up";

/// Per-request forwarding logic.
///
/// Holds only immutable configuration and shared handles, so one instance is
/// cloned into every request task without locking.
#[derive(Debug, Clone)]
pub struct ForwardingHandler {
    upstream: UpstreamClient,
    relays: RelayTracker,
}

impl ForwardingHandler {
    pub fn new(config: &GatewayConfig, relays: RelayTracker) -> Self {
        Self {
            upstream: UpstreamClient::new(&config.upstream),
            relays,
        }
    }

    /// Handle one inbound request.
    ///
    /// Only the path is read. The method, headers, query string and body of
    /// the inbound request do not reach the upstream.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let path = request.uri().path();

        if path == "/" {
            return GREETING.into_response();
        }

        match self.upstream.get(path).await {
            Ok(upstream) => relay_response(upstream, self.relays.begin()),
            Err(e) => {
                tracing::debug!(
                    url = %e.target(),
                    error = %e.describe(),
                    "Upstream unreachable"
                );
                e.into_response()
            }
        }
    }
}

/// Axum entry point for every inbound request.
pub async fn gateway_handler(
    State(handler): State<ForwardingHandler>,
    request: Request<Body>,
) -> Response {
    handler.handle(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, StatusCode};
    use http_body_util::BodyExt;

    fn handler_for(base: &str) -> ForwardingHandler {
        let mut config = GatewayConfig::default();
        config.upstream.base_url = base.to_string();
        ForwardingHandler::new(&config, RelayTracker::new())
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_returns_greeting() {
        // The base is unusable, so any upstream call would surface as 502.
        let handler = handler_for("http://bad host");

        for method in [Method::GET, Method::POST, Method::DELETE] {
            let request = Request::builder().method(method).uri("/").body(Body::empty()).unwrap();
            let response = handler.handle(request).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
            assert_eq!(body_string(response).await, GREETING);
        }
    }

    #[tokio::test]
    async fn test_root_with_query_is_still_root() {
        let handler = handler_for("http://bad host");
        let request = Request::builder().uri("/?probe=1").body(Body::empty()).unwrap();

        let response = handler.handle(request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "SIMA Gateway up");
    }

    #[tokio::test]
    async fn test_malformed_target_is_bad_gateway() {
        let handler = handler_for("http://bad host");
        let request = Request::builder().uri("/users").body(Body::empty()).unwrap();

        let response = handler.handle(request).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_string(response).await;
        assert!(body.starts_with("parse \"http://bad host/users\""), "{body}");
        assert_eq!(handler.relays.active(), 0);
    }
}
