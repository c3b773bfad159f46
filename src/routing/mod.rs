//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (branch lookup)
//!     → matcher.rs (evaluate exact / prefix conditions)
//!     → Return: ServiceWorker | ClientFlags | Api { remainder } | Static
//!
//! Forwarding branch:
//!     remainder + query
//!     → rewrite.rs (first-match substitution on the path portion)
//!     → outgoing path and query
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same branch
//! - The rewrite regex is compiled once and applied once per request

pub mod matcher;
pub mod rewrite;
pub mod router;

pub use rewrite::{resolve_path, PathRewrite};
pub use router::{Route, Router};
