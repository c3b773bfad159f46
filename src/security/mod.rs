//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (allow-list layer, preflight handling)
//!     → [router picks a branch]
//!     → headers.rs (add X-Forwarded-Proto, X-Real-IP on the API branch)
//!
//! Relayed response (reflect mode):
//!     → headers.rs (echo Origin, allow credentials)
//! ```
//!
//! # Design Decisions
//! - Allow-list CORS is a tower layer; reflect CORS is per forwarded response
//! - Never a wildcard origin together with credentials

pub mod cors;
pub mod headers;
