//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference existing upstreams)
//! - Validate value ranges and URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: &GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted, at startup and on every reload

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: '{value}' is not a valid http(s) URL")]
    InvalidUrl { field: String, value: String },

    #[error("duplicate route name '{0}'")]
    DuplicateRoute(String),

    #[error("duplicate upstream name '{0}'")]
    DuplicateUpstream(String),

    #[error("route '{route}' references unknown upstream '{upstream}'")]
    UnknownUpstream { route: String, upstream: String },

    #[error("route '{route}': path_prefix '{prefix}' must start with '/'")]
    InvalidPathPrefix { route: String, prefix: String },

    #[error("upstream '{upstream}': '{header}' is not a valid header name")]
    InvalidHeaderName { upstream: String, header: String },

    #[error("upstream '{upstream}': credential env var for '{header}' is empty")]
    EmptyCredentialEnv { upstream: String, header: String },

    #[error("cors: '{0}' is not a valid origin")]
    InvalidOrigin(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("wallet.timeout_secs must be at least one poll interval")]
    TimeoutShorterThanPoll,
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::Zero("listener.max_body_size"));
    }

    let mut upstream_names = HashSet::new();
    for upstream in &config.upstreams {
        if !upstream_names.insert(upstream.name.as_str()) {
            errors.push(ValidationError::DuplicateUpstream(upstream.name.clone()));
        }
        if !is_http_url(&upstream.base_url) {
            errors.push(ValidationError::InvalidUrl {
                field: format!("upstream '{}' base_url", upstream.name),
                value: upstream.base_url.clone(),
            });
        }
        for credential in &upstream.credentials {
            if HeaderName::from_bytes(credential.header.as_bytes()).is_err() {
                errors.push(ValidationError::InvalidHeaderName {
                    upstream: upstream.name.clone(),
                    header: credential.header.clone(),
                });
            }
            if credential.env.trim().is_empty() {
                errors.push(ValidationError::EmptyCredentialEnv {
                    upstream: upstream.name.clone(),
                    header: credential.header.clone(),
                });
            }
        }
    }

    let mut route_names = HashSet::new();
    for route in &config.routes {
        if !route_names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }
        if !route.path_prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPathPrefix {
                route: route.name.clone(),
                prefix: route.path_prefix.clone(),
            });
        }
        if !upstream_names.contains(route.upstream.as_str()) {
            errors.push(ValidationError::UnknownUpstream {
                route: route.name.clone(),
                upstream: route.upstream.clone(),
            });
        }
    }

    for origin in &config.cors.allowed_origins {
        if origin != "*" && HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for (field, value) in [
        ("client.backend_url", &config.client.backend_url),
        ("client.proxy_url", &config.client.proxy_url),
    ] {
        if !is_http_url(value) {
            errors.push(ValidationError::InvalidUrl {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }
    if config.client.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("client.request_timeout_secs"));
    }

    let wallet = &config.wallet;
    if wallet.poll_interval_ms == 0 {
        errors.push(ValidationError::Zero("wallet.poll_interval_ms"));
    }
    if wallet.timeout_secs == 0 {
        errors.push(ValidationError::Zero("wallet.timeout_secs"));
    } else if wallet.timeout() < wallet.poll_interval() {
        errors.push(ValidationError::TimeoutShorterThanPoll);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CredentialHeader, RouteConfig, UpstreamConfig};

    #[test]
    fn test_defaults_pass() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_unknown_upstream() {
        let mut config = GatewayConfig::default();
        config.routes.push(RouteConfig {
            name: "extra".into(),
            path_prefix: "/extra".into(),
            upstream: "missing".into(),
            priority: 0,
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnknownUpstream {
                route: "extra".into(),
                upstream: "missing".into()
            }]
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.upstreams.push(UpstreamConfig {
            name: "xumm-payload".into(),
            base_url: "ftp://files".into(),
            credentials: vec![CredentialHeader {
                header: "bad header".into(),
                env: "".into(),
            }],
        });
        config.routes[0].path_prefix = "api".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6, "{:?}", errors);
        assert!(errors.contains(&ValidationError::DuplicateUpstream("xumm-payload".into())));
    }

    #[test]
    fn test_wallet_timeout_shorter_than_poll() {
        let mut config = GatewayConfig::default();
        config.wallet.poll_interval_ms = 5_000;
        config.wallet.timeout_secs = 2;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::TimeoutShorterThanPoll])
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());
        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
