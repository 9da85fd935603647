//! Configuration schema definitions.
//!
//! The gateway has a single configurable value, the upstream base address.
//! Everything else is fixed at compile time and grouped here so the server
//! receives one explicit, immutable struct.

use std::net::{Ipv4Addr, SocketAddr};

/// Port the gateway listens on. Not configurable.
pub const GATEWAY_PORT: u16 = 8081;

/// Environment variable holding the upstream base address.
pub const API_URL_ENV: &str = "API_URL";

/// Upstream base address used when `API_URL` is unset or empty.
pub const DEFAULT_API_URL: &str = "http://api:8080";

/// Root configuration for the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream the gateway forwards to.
    pub upstream: UpstreamConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Bind address, all IPv4 interfaces on [`GATEWAY_PORT`].
    pub bind_address: SocketAddr,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, GATEWAY_PORT)),
        }
    }
}

/// Upstream configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Base address that request paths are appended to, verbatim.
    ///
    /// No trailing-slash normalisation is applied: `http://api:8080/` plus
    /// `/users` yields `http://api:8080//users`.
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            default_filter: "sima_gateway=info,tower_http=info".to_string(),
        }
    }
}
