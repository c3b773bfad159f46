//! Forwarding of `/api` requests to the upstream.
//!
//! # Data Flow
//! ```text
//! Incoming request + remainder below the API prefix
//!     → resolve_path (rewrite path, reattach query)
//!     → decorate_outbound_headers (X-Forwarded-Proto, X-Real-IP)
//!     → one attempt against target_base + outgoing path
//!     → decorate_inbound_headers (reflect CORS mode only)
//!     → relayed response, or ForwardError
//! ```
//!
//! No retries and no circuit breaking. The body streams in both directions.
//! Upstreams may be `http` or `https`; TLS uses the webpki root set.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::ORIGIN, Request, Response, Uri},
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::{CorsMode, EdgeConfig};
use crate::http::request::RequestIdExt;
use crate::http::response::ForwardError;
use crate::routing::{resolve_path, PathRewrite};
use crate::security::headers::{decorate_inbound_headers, decorate_outbound_headers};

/// Error building a [`Forwarder`].
#[derive(Debug, thiserror::Error)]
pub enum ForwarderError {
    #[error("rewrite pattern does not compile: {0}")]
    Rewrite(#[from] regex::Error),
    #[error("TLS client setup failed: {0}")]
    Tls(#[from] rustls::Error),
}

/// Relays requests to a single upstream.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    target_base: String,
    rewrite: Option<PathRewrite>,
    reflect_cors: bool,
    timeout: Option<Duration>,
}

impl Forwarder {
    pub fn new(
        target_base: impl Into<String>,
        rewrite: Option<PathRewrite>,
        reflect_cors: bool,
        timeout: Option<Duration>,
    ) -> Result<Self, ForwarderError> {
        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Ok(Self {
            client,
            target_base: target_base.into().trim_end_matches('/').to_string(),
            rewrite,
            reflect_cors,
            timeout,
        })
    }

    pub fn from_config(config: &EdgeConfig) -> Result<Self, ForwarderError> {
        Self::new(
            config.upstream.target_base(&config.routing.api_prefix),
            PathRewrite::from_config(&config.rewrite)?,
            config.cors.mode == CorsMode::Reflect,
            config.upstream.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn target_base(&self) -> &str {
        &self.target_base
    }

    /// Absolute upstream URI for a path below the API prefix.
    pub fn target_uri(&self, path_and_query: &str) -> Result<Uri, ForwardError> {
        let outgoing = resolve_path(path_and_query, self.rewrite.as_ref());
        let target = format!("{}{}", self.target_base, outgoing);
        target
            .parse::<Uri>()
            .map_err(|e| ForwardError::InvalidTarget {
                reason: e.to_string(),
                target,
            })
    }

    /// Forward `req`, whose path below the API prefix is `remainder`.
    pub async fn forward(
        &self,
        req: Request<Body>,
        remainder: &str,
    ) -> Result<Response<Body>, ForwardError> {
        let client_ip = req.client_ip();
        let client_proto = req.client_proto().to_string();
        let request_id = req.request_id().to_string();
        let (parts, body) = req.into_parts();

        let path_and_query = match parts.uri.query() {
            Some(query) => format!("{remainder}?{query}"),
            None => remainder.to_string(),
        };
        let uri = self.target_uri(&path_and_query)?;
        let origin = parts.headers.get(ORIGIN).cloned();

        tracing::debug!(
            request_id = %request_id,
            method = %parts.method,
            target = %uri,
            "Forwarding request"
        );

        let mut outbound = Request::new(body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = uri;
        *outbound.headers_mut() = decorate_outbound_headers(&parts.headers, &client_proto, client_ip);

        let pending = self.client.request(outbound);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| ForwardError::Timeout(limit))?,
            None => pending.await,
        };
        let response = result.map_err(ForwardError::Unreachable)?;

        let (mut parts, body) = response.into_parts();
        if self.reflect_cors {
            decorate_inbound_headers(&mut parts.headers, origin.as_ref());
        }
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}
