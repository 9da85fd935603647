//! Configuration validation.
//!
//! # Responsibilities
//! - Check that the upstream base parses as an absolute URL
//! - Check the scheme is one the upstream client can dial
//! - Flag a query or fragment, which appended paths would land inside
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Findings are advisory; the caller logs them and keeps running

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A problem found in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream base {base:?} is not an absolute URL: {reason}")]
    InvalidUpstream { base: String, reason: String },

    #[error("upstream base {base:?} uses unsupported scheme {scheme:?}")]
    UnsupportedScheme { base: String, scheme: String },

    #[error("upstream base {base:?} carries a query or fragment; forwarded paths are appended after it")]
    TrailingComponent { base: String },
}

/// Validate a configuration, collecting every finding.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let base = &config.upstream.base_url;

    match Url::parse(base) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                errors.push(ValidationError::UnsupportedScheme {
                    base: base.clone(),
                    scheme: url.scheme().to_string(),
                });
            }
            if url.query().is_some() || url.fragment().is_some() {
                errors.push(ValidationError::TrailingComponent { base: base.clone() });
            }
        }
        Err(e) => errors.push(ValidationError::InvalidUpstream {
            base: base.clone(),
            reason: e.to_string(),
        }),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
