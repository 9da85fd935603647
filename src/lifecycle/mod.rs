//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown_signal() resolves
//!
//! Shutdown (shutdown.rs):
//!     trigger() → HttpServer stops accepting → in-flight requests drain
//! ```
//!
//! # Design Decisions
//! - The binary bounds the drain; a hung upstream cannot hold the process
//!   open forever once shutdown has been requested

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
