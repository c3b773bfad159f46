//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, client address and scheme)
//!     → [routing layer picks a branch]
//!     → forward.rs (API branch: rewrite, decorate, relay)
//!       or assets.rs (service worker, static bundle)
//!     → response.rs (map forwarding failures to status codes)
//!     → Send to client
//! ```

pub mod assets;
pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{Forwarder, ForwarderError};
pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::ForwardError;
pub use server::HttpServer;
