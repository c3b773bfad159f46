//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge process.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API the `/api` branch forwards to.
    pub upstream: UpstreamConfig,

    /// Path-based dispatch settings.
    pub routing: RoutingConfig,

    /// Path rewrite applied to forwarded requests.
    pub rewrite: RewriteConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Static bundle settings.
    pub static_files: StaticFilesConfig,

    /// Client bootstrap flags endpoint.
    pub client_flags: ClientFlagsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Upstream API configuration.
///
/// Two conventions exist for the base URL: a bare host that still needs the
/// API prefix appended, or a URL that already carries it. `includes_prefix`
/// says which one `base_url` follows.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the upstream (e.g., "http://127.0.0.1:5000").
    pub base_url: String,

    /// True when `base_url` already ends with the API path.
    pub includes_prefix: bool,

    /// Optional upstream response deadline in seconds. None means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            includes_prefix: true,
            timeout_secs: None,
        }
    }
}

/// Path-based dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Prefix that selects the forwarding branch.
    pub api_prefix: String,

    /// Path of the service worker script.
    pub service_worker_path: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            service_worker_path: "/service-worker.js".to_string(),
        }
    }
}

/// Path rewrite rule for forwarded requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Apply the rewrite at all.
    pub enabled: bool,

    /// Regular expression matched against the path portion.
    pub pattern: String,

    /// Replacement for the first match.
    pub replacement: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pattern: "v1".to_string(),
            replacement: "api/v1".to_string(),
        }
    }
}

/// How cross-origin headers are produced.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CorsMode {
    /// A CORS layer in front of every route, driven by `allowed_origins`.
    #[default]
    AllowList,
    /// Echo the request `Origin` on forwarded responses only.
    Reflect,
    /// No CORS headers at all.
    Disabled,
}

impl std::str::FromStr for CorsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow-list" | "allowlist" => Ok(Self::AllowList),
            "reflect" => Ok(Self::Reflect),
            "disabled" | "off" => Ok(Self::Disabled),
            other => Err(format!("unknown CORS mode '{other}'")),
        }
    }
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub mode: CorsMode,

    /// Origins granted CORS headers in `allow-list` mode. The upstream's own
    /// origin is added at startup.
    pub allowed_origins: Vec<String>,

    /// Send `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            mode: CorsMode::AllowList,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allow_credentials: true,
        }
    }
}

/// Static bundle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory holding the built bundle.
    pub root: String,

    /// Serve `index.html` for paths with no matching file.
    pub spa_fallback: bool,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: "build".to_string(),
            spa_fallback: false,
        }
    }
}

/// Client bootstrap flags endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientFlagsConfig {
    /// Path the flags are served at. None disables the endpoint.
    pub path: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus endpoint bind address. None disables metrics export.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}

impl UpstreamConfig {
    /// Base URL the rewritten path is appended to.
    ///
    /// Appends `api_prefix` unless the configured URL already carries it.
    pub fn target_base(&self, api_prefix: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.includes_prefix {
            base.to_string()
        } else {
            format!("{base}{api_prefix}")
        }
    }
}
