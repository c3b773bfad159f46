//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{CorsMode, EdgeConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "EDGE_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EdgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EdgeConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the startup configuration.
///
/// Defaults, then the file named by `EDGE_CONFIG` (if any), then environment
/// overrides, then validation.
pub fn load_from_env() -> Result<EdgeConfig, ConfigError> {
    let lookup = |key: &str| std::env::var(key).ok();

    let base = match lookup(CONFIG_PATH_ENV) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        }
        None => EdgeConfig::default(),
    };

    let config = apply_env(base, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides on top of `config`.
///
/// `API_URL` (base already carries the API path) wins over `API_HOST` (the
/// API prefix gets appended). A bare `API_HOST` turns the path rewrite off,
/// since the prefix is already in the target; `API_REWRITE` still overrides
/// that. Empty values count as unset.
pub fn apply_env<F>(mut config: EdgeConfig, lookup: F) -> Result<EdgeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    match (var("API_URL"), var("API_HOST")) {
        (Some(url), host) => {
            if host.is_some() {
                tracing::warn!("Both API_URL and API_HOST are set; using API_URL");
            }
            config.upstream.base_url = url;
            config.upstream.includes_prefix = true;
        }
        (None, Some(host)) => {
            config.upstream.base_url = host;
            config.upstream.includes_prefix = false;
            config.rewrite.enabled = false;
        }
        (None, None) => {}
    }

    if let Some(value) = var("API_REWRITE") {
        config.rewrite.enabled = parse_bool("API_REWRITE", &value)?;
    }

    if let Some(value) = var("UPSTREAM_TIMEOUT_SECS") {
        let secs = value.trim().parse::<u64>().map_err(|e| ConfigError::Env {
            var: "UPSTREAM_TIMEOUT_SECS",
            reason: e.to_string(),
        })?;
        config.upstream.timeout_secs = Some(secs);
    }

    if let Some(value) = var("CORS_MODE") {
        config.cors.mode = value
            .parse::<CorsMode>()
            .map_err(|reason| ConfigError::Env { var: "CORS_MODE", reason })?;
    }

    if let Some(value) = var("CORS_ALLOWED_ORIGINS") {
        for origin in split_list(&value) {
            if !config.cors.allowed_origins.contains(&origin) {
                config.cors.allowed_origins.push(origin);
            }
        }
    }

    if let Some(root) = var("STATIC_ROOT") {
        config.static_files.root = root;
    }

    if let Some(value) = var("SPA_FALLBACK") {
        config.static_files.spa_fallback = parse_bool("SPA_FALLBACK", &value)?;
    }

    if let Some(addr) = var("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }

    if let Some(level) = var("LOG_LEVEL") {
        config.observability.log_level = level;
    }

    if let Some(addr) = var("METRICS_ADDRESS") {
        config.observability.metrics_address = Some(addr);
    }

    if let Some(path) = var("CLIENT_FLAGS_PATH") {
        config.client_flags.path = Some(path);
    }

    Ok(config)
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(ConfigError::Env {
            var,
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}
