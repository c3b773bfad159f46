//! Static bundle serving.
//!
//! Files come from the build directory through `tower_http::services::ServeDir`;
//! a miss is a plain 404 unless the SPA fallback is switched on. The service
//! worker script is served on its own with caching disabled.

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use axum::{
    body::{Body, Bytes, HttpBody},
    http::{header::CACHE_CONTROL, HeaderValue, Request},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// Cache-Control sent with the service worker script.
pub const SERVICE_WORKER_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, private";

/// Serves files from the build directory.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    root: PathBuf,
    service_worker: PathBuf,
    spa_fallback: bool,
}

impl StaticAssets {
    pub fn new(root: impl Into<PathBuf>, service_worker_path: &str, spa_fallback: bool) -> Self {
        let root = root.into();
        let service_worker = root.join(service_worker_path.trim_start_matches('/'));
        Self {
            root,
            service_worker,
            spa_fallback,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serve the file matching the request path.
    pub async fn serve(&self, req: Request<Body>) -> Response {
        if self.spa_fallback {
            let index = ServeFile::new(self.root.join("index.html"));
            into_response(ServeDir::new(&self.root).fallback(index).oneshot(req).await)
        } else {
            into_response(ServeDir::new(&self.root).oneshot(req).await)
        }
    }

    /// Serve the service worker with caching disabled, whatever the status.
    pub async fn serve_service_worker(&self, req: Request<Body>) -> Response {
        let mut response = into_response(ServeFile::new(&self.service_worker).oneshot(req).await);
        response.headers_mut().insert(
            CACHE_CONTROL,
            HeaderValue::from_static(SERVICE_WORKER_CACHE_CONTROL),
        );
        response
    }
}

fn into_response<B>(result: Result<axum::http::Response<B>, Infallible>) -> Response
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<axum::BoxError>,
{
    match result {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
