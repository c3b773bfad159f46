//! Allow-list CORS layer.
//!
//! Applied in front of every route when `cors.mode = "allow-list"`. Origins
//! outside the list get no `Access-Control-Allow-Origin`.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use url::Url;

use crate::config::CorsConfig;

/// Origins granted CORS headers: the configured list plus the upstream's own
/// origin, deduplicated, in that order.
pub fn allowed_origins(config: &CorsConfig, upstream_base_url: &str) -> Vec<String> {
    let mut origins = config.allowed_origins.clone();
    if let Ok(url) = Url::parse(upstream_base_url) {
        let upstream = url.origin().ascii_serialization();
        if !origins.contains(&upstream) {
            origins.push(upstream);
        }
    }
    origins
}

/// Build the allow-list layer.
///
/// Methods and headers mirror the preflight request, which keeps the layer
/// valid together with `allow_credentials(true)`.
pub fn cors_layer(config: &CorsConfig, upstream_base_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins(config, upstream_base_url)
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    tracing::info!(origins = ?origins, "CORS allowed origins configured");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_origin_is_added() {
        let config = CorsConfig {
            allowed_origins: vec![
                "http://localhost:3000".into(),
                "https://login.partner.example".into(),
            ],
            ..CorsConfig::default()
        };
        assert_eq!(
            allowed_origins(&config, "http://backend:5000/api"),
            vec![
                "http://localhost:3000",
                "https://login.partner.example",
                "http://backend:5000",
            ]
        );
    }

    #[test]
    fn upstream_origin_is_not_duplicated() {
        let config = CorsConfig::default();
        assert_eq!(
            allowed_origins(&config, "http://localhost:3000/"),
            vec!["http://localhost:3000"]
        );
    }

    #[tokio::test]
    async fn layer_grants_listed_origin_with_credentials() {
        use axum::{body::Body, http::Request, routing::get, Router};
        use tower::ServiceExt;

        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer(&CorsConfig::default(), "http://127.0.0.1:5000"));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
