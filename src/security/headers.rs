//! Header manipulation for the forwarding branch.
//!
//! # Responsibilities
//! - Add X-Forwarded-Proto and X-Real-IP to outbound requests
//! - Reflect the request Origin onto relayed responses (reflect CORS mode)
//!
//! # Design Decisions
//! - Outbound headers are copied into a new map; the incoming map is untouched
//! - Every other header, hop-by-hop included, passes through as received
//! - An existing X-Forwarded-Proto / X-Real-IP is overwritten, never appended

use std::net::IpAddr;

use axum::http::{
    header::{ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN},
    HeaderMap, HeaderName, HeaderValue,
};

pub const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
pub const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Build the header map for the outgoing request.
pub fn decorate_outbound_headers(
    headers: &HeaderMap,
    client_proto: &str,
    client_ip: Option<IpAddr>,
) -> HeaderMap {
    let mut outbound = headers.clone();

    match HeaderValue::from_str(client_proto) {
        Ok(proto) => {
            outbound.insert(X_FORWARDED_PROTO, proto);
        }
        Err(_) => tracing::warn!(proto = %client_proto, "Unrepresentable client protocol"),
    }

    if let Some(ip) = client_ip {
        // An IP address always renders to visible ASCII.
        if let Ok(value) = HeaderValue::from_str(&ip.to_string()) {
            outbound.insert(X_REAL_IP, value);
        }
    }

    outbound
}

/// Reflect the request origin onto a relayed response.
///
/// Without an `Origin` on the request nothing is added.
pub fn decorate_inbound_headers(headers: &mut HeaderMap, request_origin: Option<&HeaderValue>) {
    if let Some(origin) = request_origin {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    }
}
