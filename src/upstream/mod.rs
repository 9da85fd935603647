//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! request path
//!     → client.rs (base + path → target URI, GET)
//!     → Ok(upstream response)  → http::response relays it
//!     → Err(error.rs)          → 502 with the error description
//! ```
//!
//! # Design Decisions
//! - One GET per request, no retries, no timeout
//! - Only the inbound path travels upstream; headers, body, method and query
//!   string stay behind
//! - Every failure before the upstream status arrives is one error kind

pub mod client;
pub mod error;

pub use client::{UpstreamClient, UpstreamResponse};
pub use error::UpstreamError;
