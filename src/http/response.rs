//! Response relay from upstream to client.
//!
//! # Responsibilities
//! - Copy the upstream status code unchanged
//! - Copy upstream headers, keeping only the first value of each name
//! - Stream the upstream body through a [`RelayBody`]
//!
//! # Design Decisions
//! - Multi-value headers collapse to their first value. This drops the second
//!   and later `Set-Cookie` lines; kept deliberately for parity with the
//!   gateway this replaces
//! - Hop-by-hop headers are not relayed; the server frames the outbound
//!   connection itself
//! - Status and headers are committed before the body streams, so a body
//!   failure cannot change the status the client already saw

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName},
    response::Response,
};

use crate::http::relay::{RelayBody, RelayGuard};
use crate::upstream::UpstreamResponse;

/// Hop-by-hop headers, meaningful only for a single connection.
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.iter().any(|hop| *hop == name.as_str())
}

/// Copy `upstream` keeping the first value of every end-to-end header.
pub fn collapse_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.keys_len());
    for name in upstream.keys().filter(|name| !is_hop_by_hop(name)) {
        if let Some(value) = upstream.get(name) {
            headers.insert(name.clone(), value.clone());
        }
    }
    headers
}

/// Turn an upstream response into the outbound response.
///
/// `guard` is held by the body until the server drops it.
pub fn relay_response(upstream: UpstreamResponse, guard: RelayGuard) -> Response {
    let (parts, body) = upstream.into_parts();

    let mut response = Response::new(Body::new(RelayBody::new(Body::new(body), guard)));
    *response.status_mut() = parts.status;
    *response.headers_mut() = collapse_headers(&parts.headers);
    response
}
