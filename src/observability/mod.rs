//! Observability subsystem.
//!
//! Structured logging through `tracing`. Per-request spans come from
//! `tower_http`'s trace layer and are emitted at DEBUG, so the default filter
//! only shows startup and shutdown.

pub mod logging;

pub use logging::init_logging;
