//! Configuration loading from the process environment.

use crate::config::schema::{GatewayConfig, API_URL_ENV};

/// Load configuration from the process environment.
pub fn load_config() -> GatewayConfig {
    load_config_with(|key| std::env::var(key).ok())
}

/// Load configuration using `lookup` to resolve environment variables.
///
/// An unset or empty `API_URL` keeps the default upstream. Any other value is
/// taken exactly as given.
pub fn load_config_with<F>(lookup: F) -> GatewayConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = GatewayConfig::default();

    if let Some(base_url) = lookup(API_URL_ENV).filter(|value| !value.is_empty()) {
        config.upstream.base_url = base_url;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DEFAULT_API_URL, GATEWAY_PORT};

    #[test]
    fn test_unset_api_url_uses_default() {
        let config = load_config_with(|_| None);
        assert_eq!(config.upstream.base_url, DEFAULT_API_URL);
        assert_eq!(config.upstream.base_url, "http://api:8080");
    }

    #[test]
    fn test_empty_api_url_uses_default() {
        let config = load_config_with(|key| (key == API_URL_ENV).then(String::new));
        assert_eq!(config.upstream.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_api_url_taken_verbatim() {
        for value in ["http://backend:9000", "http://backend:9000/", "https://x.example/api/", " odd "] {
            let config = load_config_with(|key| (key == API_URL_ENV).then(|| value.to_string()));
            assert_eq!(config.upstream.base_url, value);
        }
    }

    #[test]
    fn test_other_variables_ignored() {
        let config = load_config_with(|key| (key != API_URL_ENV).then(|| "http://nope".to_string()));
        assert_eq!(config.upstream.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_listener_port_fixed() {
        let config = load_config_with(|_| None);
        assert_eq!(config.listener.bind_address.port(), GATEWAY_PORT);
        assert!(config.listener.bind_address.ip().is_unspecified());
    }
}
