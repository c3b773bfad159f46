//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (EdgeConfig::default)
//!     → optional TOML file named by EDGE_CONFIG (loader.rs)
//!     → environment overrides: API_URL / API_HOST / ... (loader.rs)
//!     → validation.rs (semantic checks)
//!     → EdgeConfig (validated, immutable)
//!     → shared via Arc to the server
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never changes afterwards
//! - All fields have defaults to allow an empty environment
//! - The upstream URL convention is an explicit flag, never guessed

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env, load_config, load_from_env, ConfigError};
pub use schema::{
    ClientFlagsConfig, CorsConfig, CorsMode, EdgeConfig, ListenerConfig, ObservabilityConfig,
    RewriteConfig, RoutingConfig, StaticFilesConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
