//! Upstream failure type.

use std::error::Error as StdError;
use std::fmt::Write;

use axum::{
    http::{header, uri::InvalidUri, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The upstream could not be reached.
///
/// Covers everything that can go wrong before a final upstream response is
/// in hand, redirect hops included. All variants map to `502 Bad Gateway`.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Base address plus path did not form a valid URI.
    #[error("parse {target:?}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: InvalidUri,
    },

    /// DNS, connect, TLS or protocol failure while waiting for the response.
    #[error("Get {target:?}: {source}")]
    Request {
        target: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    /// A redirect carried a `Location` that does not resolve to a URL.
    #[error("Get {target:?}: failed to parse Location header {location:?}: {source}")]
    InvalidLocation {
        target: String,
        location: String,
        #[source]
        source: url::ParseError,
    },

    /// The upstream kept redirecting past the hop limit.
    #[error("Get {target:?}: stopped after {redirects} redirects")]
    TooManyRedirects { target: String, redirects: usize },
}

impl UpstreamError {
    /// The target URL the failed request was aimed at.
    pub fn target(&self) -> &str {
        match self {
            Self::InvalidTarget { target, .. }
            | Self::Request { target, .. }
            | Self::InvalidLocation { target, .. }
            | Self::TooManyRedirects { target, .. } => target,
        }
    }

    /// Message plus every underlying cause, joined with `": "`.
    ///
    /// hyper's client errors are terse at the top level ("client error
    /// (Connect)"); the useful part lives further down the source chain.
    pub fn describe(&self) -> String {
        let mut description = self.to_string();
        let mut cause = self.source().and_then(|err| err.source());
        while let Some(err) = cause {
            let _ = write!(description, ": {err}");
            cause = err.source();
        }
        description
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::BAD_GATEWAY, self.describe()).into_response();
        response.headers_mut().insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn invalid_target() -> UpstreamError {
        let target = "http://bad host/x".to_string();
        let source = Uri::try_from(target.as_str()).unwrap_err();
        UpstreamError::InvalidTarget { target, source }
    }

    #[test]
    fn test_describe_includes_target() {
        let err = invalid_target();
        assert_eq!(err.target(), "http://bad host/x");
        assert!(err.describe().starts_with("parse \"http://bad host/x\": "));
    }

    #[test]
    fn test_into_response_is_bad_gateway() {
        let err = invalid_target();
        let description = err.describe();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert!(!description.is_empty());
    }

    #[test]
    fn test_redirect_limit_names_last_target() {
        let err = UpstreamError::TooManyRedirects {
            target: "http://api:8080/loop".to_string(),
            redirects: 10,
        };
        assert_eq!(err.target(), "http://api:8080/loop");
        assert_eq!(
            err.describe(),
            "Get \"http://api:8080/loop\": stopped after 10 redirects"
        );
    }
}
