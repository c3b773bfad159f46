//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs, paths and the rewrite pattern
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use regex::Regex;
use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),
    #[error("upstream.base_url '{0}' is not a valid URL")]
    UpstreamUrl(String),
    #[error("upstream.base_url '{0}' must use http or https")]
    UpstreamScheme(String),
    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("{field} '{value}' must start with '/'")]
    RelativePath { field: &'static str, value: String },
    #[error("routing.api_prefix '{0}' must not end with '/'")]
    TrailingSlash(String),
    #[error("rewrite.pattern '{pattern}' does not compile: {reason}")]
    RewritePattern { pattern: String, reason: String },
    #[error("cors.allowed_origins contains invalid origin '{0}'")]
    CorsOrigin(String),
    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::UpstreamScheme(config.upstream.base_url.clone()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::UpstreamUrl(config.upstream.base_url.clone())),
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    let prefix = &config.routing.api_prefix;
    if !prefix.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            field: "routing.api_prefix",
            value: prefix.clone(),
        });
    } else if prefix.len() > 1 && prefix.ends_with('/') {
        errors.push(ValidationError::TrailingSlash(prefix.clone()));
    }

    if !config.routing.service_worker_path.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            field: "routing.service_worker_path",
            value: config.routing.service_worker_path.clone(),
        });
    }

    if let Some(path) = &config.client_flags.path {
        if !path.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                field: "client_flags.path",
                value: path.clone(),
            });
        }
    }

    if config.rewrite.enabled {
        if let Err(e) = Regex::new(&config.rewrite.pattern) {
            errors.push(ValidationError::RewritePattern {
                pattern: config.rewrite.pattern.clone(),
                reason: e.to_string(),
            });
        }
    }

    for origin in &config.cors.allowed_origins {
        if !is_origin(origin) {
            errors.push(ValidationError::CorsOrigin(origin.clone()));
        }
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::MetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An origin is `scheme://host[:port]` with nothing after it.
fn is_origin(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some()
                && url.origin().ascii_serialization() == value.trim_end_matches('/')
        }
        Err(_) => false,
    }
}
