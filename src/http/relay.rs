//! Upstream body relay with release tracking.
//!
//! # Responsibilities
//! - Stream the upstream body to the client frame by frame
//! - Count in-flight relays so leaks are observable
//! - Release the upstream body on every exit path
//!
//! The server drops the outbound body when it is finished with it: after the
//! last frame, after a stream error, or when the client goes away. Dropping
//! [`RelayBody`] drops the upstream body (returning or closing its
//! connection) and the [`RelayGuard`] it carries.

use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};

/// Counts upstream bodies that are currently being relayed.
#[derive(Debug, Clone, Default)]
pub struct RelayTracker {
    active: Arc<AtomicUsize>,
}

impl RelayTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relay; the slot is released when the guard drops.
    pub fn begin(&self) -> RelayGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        RelayGuard {
            active: self.active.clone(),
        }
    }

    /// Number of relays whose upstream body has not been released yet.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// A RAII guard that holds one in-flight relay slot.
#[derive(Debug)]
pub struct RelayGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for RelayGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Outbound body that forwards upstream frames unchanged.
pub struct RelayBody {
    inner: Body,
    relayed_bytes: u64,
    finished: bool,
    _guard: RelayGuard,
}

impl RelayBody {
    pub fn new(inner: Body, guard: RelayGuard) -> Self {
        Self {
            inner,
            relayed_bytes: 0,
            finished: false,
            _guard: guard,
        }
    }

    /// Bytes of body data handed to the server so far.
    pub fn relayed_bytes(&self) -> u64 {
        self.relayed_bytes
    }
}

impl HttpBody for RelayBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_frame(cx) {
            Poll::Ready(Some(Ok(frame))) => {
                if let Some(data) = frame.data_ref() {
                    this.relayed_bytes += data.len() as u64;
                }
                Poll::Ready(Some(Ok(frame)))
            }
            Poll::Ready(None) => {
                this.finished = true;
                Poll::Ready(None)
            }
            Poll::Ready(Some(Err(e))) => {
                tracing::debug!(
                    relayed_bytes = this.relayed_bytes,
                    error = %e,
                    "Upstream body failed mid-stream"
                );
                Poll::Ready(Some(Err(e)))
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for RelayBody {
    fn drop(&mut self) {
        if self.finished || self.inner.is_end_stream() {
            tracing::debug!(relayed_bytes = self.relayed_bytes, "Upstream body relayed");
        } else {
            tracing::debug!(
                relayed_bytes = self.relayed_bytes,
                "Upstream body released before end of stream"
            );
        }
    }
}
