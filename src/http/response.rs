//! Upstream error mapping.
//!
//! # Responsibilities
//! - Classify failed forwards
//! - Map them to HTTP status codes for the client
//! - Expose the underlying error code for logs
//!
//! # Design Decisions
//! - Transport failures result in 502 Bad Gateway
//! - Configured timeouts result in 504 Gateway Timeout
//! - A failed forward is answered, never propagated as a panic

use std::error::Error as _;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure of one forward attempt.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// Connection refused, DNS failure, reset, or any other transport error.
    #[error("upstream unreachable: {0}")]
    Unreachable(#[source] hyper_util::client::legacy::Error),

    /// No response within the configured deadline.
    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    /// The rewritten path does not form a valid URI.
    #[error("invalid upstream target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },
}

impl ForwardError {
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::Unreachable(_) | ForwardError::InvalidTarget { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ForwardError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Metric label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Unreachable(_) => "unreachable",
            ForwardError::Timeout(_) => "timeout",
            ForwardError::InvalidTarget { .. } => "invalid_target",
        }
    }

    /// Underlying error code, e.g. `ConnectionRefused`.
    ///
    /// Walks the source chain for an I/O error; falls back to a coarse label.
    pub fn code(&self) -> String {
        match self {
            ForwardError::Unreachable(e) => {
                let mut source = e.source();
                while let Some(err) = source {
                    if let Some(io) = err.downcast_ref::<std::io::Error>() {
                        return format!("{:?}", io.kind());
                    }
                    source = err.source();
                }
                if e.is_connect() {
                    "ConnectError".to_string()
                } else {
                    "TransportError".to_string()
                }
            }
            ForwardError::Timeout(_) => "TimedOut".to_string(),
            ForwardError::InvalidTarget { .. } => "InvalidUri".to_string(),
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let message = match self {
            ForwardError::Unreachable(_) => "Upstream request failed",
            ForwardError::Timeout(_) => "Upstream timed out",
            ForwardError::InvalidTarget { .. } => "Invalid upstream target",
        };
        (self.status(), message).into_response()
    }
}
