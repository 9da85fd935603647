//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (API_URL)
//!     → loader.rs (lookup, apply defaults)
//!     → validation.rs (advisory semantic checks)
//!     → GatewayConfig (immutable)
//!     → moved into HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Config is read exactly once; there is no reload path
//! - Every field has a default, so an empty environment is a valid config
//! - Validation findings are reported, never fatal: the upstream base is used
//!   verbatim and a bad base surfaces per request as 502

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with};
pub use schema::{
    GatewayConfig, ListenerConfig, ObservabilityConfig, UpstreamConfig, API_URL_ENV,
    DEFAULT_API_URL, GATEWAY_PORT,
};
pub use validation::{validate_config, ValidationError};
