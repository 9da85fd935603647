//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace layer)
//!     → handler.rs (root check, forward to upstream)
//!     → response.rs (status + first-value headers)
//!     → relay.rs (stream body, release upstream on drop)
//!     → Send to client
//! ```

pub mod handler;
pub mod relay;
pub mod response;
pub mod server;

pub use handler::{ForwardingHandler, GREETING};
pub use relay::{RelayBody, RelayGuard, RelayTracker};
pub use server::HttpServer;
