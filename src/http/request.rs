//! Request identification and client facts.
//!
//! # Responsibilities
//! - Attach a request ID (incoming `x-request-id` or a fresh UUID v4)
//! - Echo the ID on the response
//! - Extract the client's address and protocol for forwarding headers
//!
//! # Design Decisions
//! - The ID lives in request extensions; incoming headers are never modified,
//!   so a forwarded request carries exactly what the client sent
//! - Request ID added as early as possible for tracing

use std::net::{IpAddr, SocketAddr};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Identifier of one request/response cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access to per-request facts stored by the middleware and the listener.
pub trait RequestIdExt {
    /// The request ID, or "unknown" outside the middleware.
    fn request_id(&self) -> &str;

    /// Peer IP from the listener, when served over a real socket.
    fn client_ip(&self) -> Option<IpAddr>;

    /// Scheme the client used to reach the edge.
    fn client_proto(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.extensions()
            .get::<RequestId>()
            .map_or("unknown", RequestId::as_str)
    }

    fn client_ip(&self) -> Option<IpAddr> {
        self.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    }

    fn client_proto(&self) -> &str {
        // The edge does not terminate TLS; absolute-form URIs may still name one.
        self.uri().scheme_str().unwrap_or("http")
    }
}

/// Middleware that assigns the request ID and echoes it on the response.
pub async fn request_id_middleware(mut req: Request<Body>, next: Next) -> Response {
    let id = req
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| RequestId(v.to_string()))
        .unwrap_or_else(RequestId::generate);

    req.extensions_mut().insert(id.clone());
    let mut response = next.run(req).await;

    if !response.headers().contains_key(&X_REQUEST_ID) {
        if let Ok(value) = HeaderValue::from_str(id.as_str()) {
            response.headers_mut().insert(X_REQUEST_ID, value);
        }
    }
    response
}
