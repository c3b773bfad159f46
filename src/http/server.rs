//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with one dispatching handler
//! - Wire up middleware (tracing, request ID, CORS)
//! - Dispatch each request to exactly one branch
//! - Serve until shutdown, draining in-flight requests

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::bootstrap::ClientFlags;
use crate::config::{CorsMode, EdgeConfig};
use crate::http::assets::StaticAssets;
use crate::http::forward::{Forwarder, ForwarderError};
use crate::http::request::{request_id_middleware, RequestIdExt};
use crate::lifecycle::shutdown::shutdown_requested;
use crate::observability::metrics;
use crate::routing::{Route, Router as EdgeRouter};
use crate::security::cors::cors_layer;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EdgeRouter>,
    pub forwarder: Forwarder,
    pub assets: StaticAssets,
    pub client_flags: Arc<ClientFlags>,
}

/// HTTP server for the edge.
pub struct HttpServer {
    router: Router,
    config: Arc<EdgeConfig>,
}

impl HttpServer {
    /// Create a server; client flags are read from the environment.
    pub fn new(config: EdgeConfig) -> Result<Self, ForwarderError> {
        Self::with_client_flags(config, ClientFlags::from_env())
    }

    pub fn with_client_flags(
        config: EdgeConfig,
        flags: ClientFlags,
    ) -> Result<Self, ForwarderError> {
        let state = AppState {
            router: Arc::new(EdgeRouter::from_config(&config)),
            forwarder: Forwarder::from_config(&config)?,
            assets: StaticAssets::new(
                &config.static_files.root,
                &config.routing.service_worker_path,
                config.static_files.spa_fallback,
            ),
            client_flags: Arc::new(flags),
        };

        tracing::info!(
            upstream = %state.forwarder.target_base(),
            static_root = %state.assets.root().display(),
            cors_mode = ?config.cors.mode,
            "Edge configured"
        );

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        let router = Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id_middleware));

        match config.cors.mode {
            CorsMode::AllowList => router.layer(cors_layer(&config.cors, &config.upstream.base_url)),
            CorsMode::Reflect | CorsMode::Disabled => router,
        }
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    /// Run the server until a signal arrives or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_requested(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main handler. Picks the branch and produces the response.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let route = state.router.route(&path);
    let branch = route.branch();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        branch,
        "Dispatching request"
    );

    let response = match route {
        Route::ServiceWorker => state.assets.serve_service_worker(request).await,
        Route::ClientFlags => Json(state.client_flags.as_ref().clone()).into_response(),
        Route::Api { remainder } => match state.forwarder.forward(request, remainder).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    code = %e.code(),
                    error = %e,
                    "Upstream error"
                );
                metrics::record_upstream_error(e.kind());
                e.into_response()
            }
        },
        Route::Static => state.assets.serve(request).await,
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), branch, start);
    response
}
