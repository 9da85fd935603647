//! Outbound HTTP client for the upstream service.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, Response, StatusCode, Uri},
};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::UpstreamConfig;
use crate::upstream::error::UpstreamError;

/// Response as received from the upstream, body still unread.
pub type UpstreamResponse = Response<Incoming>;

const USER_AGENT: &str = concat!("sima-gateway/", env!("CARGO_PKG_VERSION"));

/// Requests issued for one `get` before a further redirect is refused.
const MAX_REDIRECTS: usize = 10;

/// Issues GET requests against a fixed base address.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    base_url: Arc<str>,
    client: Client<HttpsConnector<HttpConnector>, Body>,
}

impl UpstreamClient {
    /// Create a client for the configured upstream. Accepts both `http` and
    /// `https` bases.
    pub fn new(config: &UpstreamConfig) -> Self {
        let https = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(https);

        Self {
            base_url: Arc::from(config.base_url.as_str()),
            client,
        }
    }

    /// Build the target URL for `path` by plain concatenation.
    pub fn target_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `base + path` and return the response once its head arrives.
    ///
    /// Redirects (301, 302, 303, 307, 308) are followed, each hop resolving
    /// `Location` against the URL just requested. A redirect without a
    /// `Location` is returned as is. Waits as long as the upstream takes;
    /// there is no timeout.
    pub async fn get(&self, path: &str) -> Result<UpstreamResponse, UpstreamError> {
        let mut target = self.target_for(path);
        let mut issued = 0;

        loop {
            let response = self.send(&target).await?;
            issued += 1;

            let Some(location) = redirect_location(&response) else {
                return Ok(response);
            };

            if issued >= MAX_REDIRECTS {
                return Err(UpstreamError::TooManyRedirects {
                    target,
                    redirects: MAX_REDIRECTS,
                });
            }

            let next = resolve_location(&target, &location)?;
            tracing::debug!(
                from = %target,
                to = %next,
                status = response.status().as_u16(),
                "Following upstream redirect"
            );
            target = next;
        }
    }

    async fn send(&self, target: &str) -> Result<UpstreamResponse, UpstreamError> {
        let uri = Uri::try_from(target).map_err(|source| UpstreamError::InvalidTarget {
            target: target.to_string(),
            source,
        })?;

        // GET is the default method.
        let mut request = Request::new(Body::empty());
        *request.uri_mut() = uri;
        request
            .headers_mut()
            .insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        tracing::debug!(url = %target, "Forwarding to upstream");

        self.client
            .request(request)
            .await
            .map_err(|source| UpstreamError::Request {
                target: target.to_string(),
                source,
            })
    }
}

/// `Location` of a followable redirect, if `response` is one.
fn redirect_location(response: &UpstreamResponse) -> Option<String> {
    match response.status() {
        StatusCode::MOVED_PERMANENTLY
        | StatusCode::FOUND
        | StatusCode::SEE_OTHER
        | StatusCode::TEMPORARY_REDIRECT
        | StatusCode::PERMANENT_REDIRECT => {}
        _ => return None,
    }

    let location = response.headers().get(header::LOCATION)?;
    let location = String::from_utf8_lossy(location.as_bytes()).into_owned();
    (!location.is_empty()).then_some(location)
}

/// Resolve a `Location` value against the URL that produced it.
fn resolve_location(target: &str, location: &str) -> Result<String, UpstreamError> {
    url::Url::parse(target)
        .and_then(|base| base.join(location))
        .map(String::from)
        .map_err(|source| UpstreamError::InvalidLocation {
            target: target.to_string(),
            location: location.to_string(),
            source,
        })
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
