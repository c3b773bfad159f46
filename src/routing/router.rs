//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Classify a request path into exactly one branch
//! - Hand the forwarding branch the path below the API mount
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Fixed priority: service worker, client flags, API, static
//! - Every path resolves to a branch; there is no no-match case

use crate::config::EdgeConfig;
use crate::routing::matcher::{ExactPathMatcher, Matcher, PathPrefixMatcher};

/// Branch selected for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// Service worker script, served with cache-busting headers.
    ServiceWorker,
    /// Client bootstrap flags as JSON.
    ClientFlags,
    /// Forward upstream; carries the path below the API prefix.
    Api { remainder: &'a str },
    /// Everything else comes from the build directory.
    Static,
}

impl Route<'_> {
    /// Short label for logs and metrics.
    pub fn branch(&self) -> &'static str {
        match self {
            Route::ServiceWorker => "service_worker",
            Route::ClientFlags => "client_flags",
            Route::Api { .. } => "api",
            Route::Static => "static",
        }
    }
}

/// Path router for the edge.
#[derive(Debug)]
pub struct Router {
    service_worker: ExactPathMatcher,
    client_flags: Option<ExactPathMatcher>,
    api: PathPrefixMatcher,
}

impl Router {
    pub fn new(api_prefix: &str, service_worker_path: &str, client_flags_path: Option<&str>) -> Self {
        Self {
            service_worker: ExactPathMatcher::new(service_worker_path),
            client_flags: client_flags_path.map(ExactPathMatcher::new),
            api: PathPrefixMatcher::new(api_prefix),
        }
    }

    pub fn from_config(config: &EdgeConfig) -> Self {
        Self::new(
            &config.routing.api_prefix,
            &config.routing.service_worker_path,
            config.client_flags.path.as_deref(),
        )
    }

    /// Select the branch for `path`.
    pub fn route<'a>(&self, path: &'a str) -> Route<'a> {
        if self.service_worker.matches(path) {
            return Route::ServiceWorker;
        }
        if self.client_flags.as_ref().is_some_and(|m| m.matches(path)) {
            return Route::ClientFlags;
        }
        match self.api.strip(path) {
            Some(remainder) => Route::Api { remainder },
            None => Route::Static,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new("/api", "/service-worker.js", Some("/flags.json"))
    }

    #[test]
    fn api_paths_forward_with_remainder() {
        let router = router();
        assert_eq!(
            router.route("/api/v1/users"),
            Route::Api { remainder: "/v1/users" }
        );
        assert_eq!(router.route("/api"), Route::Api { remainder: "/" });
    }

    #[test]
    fn everything_else_is_static() {
        let router = router();
        assert_eq!(router.route("/"), Route::Static);
        assert_eq!(router.route("/static/js/main.js"), Route::Static);
        assert_eq!(router.route("/apiary.html"), Route::Static);
    }

    #[test]
    fn service_worker_has_priority() {
        let router = Router::new("/", "/service-worker.js", None);
        // Even with the API mounted at the root, the service worker wins.
        assert_eq!(router.route("/service-worker.js"), Route::ServiceWorker);
    }

    #[test]
    fn client_flags_only_when_configured() {
        assert_eq!(router().route("/flags.json"), Route::ClientFlags);
        let router = Router::new("/api", "/service-worker.js", None);
        assert_eq!(router.route("/flags.json"), Route::Static);
    }

    #[test]
    fn branch_labels() {
        assert_eq!(Route::Api { remainder: "/" }.branch(), "api");
        assert_eq!(Route::Static.branch(), "static");
    }
}
