//! Path matching logic.
//!
//! # Responsibilities
//! - Match an exact path (service worker, flags endpoint)
//! - Match a mount prefix on a segment boundary and yield the remainder
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - `/api` mounts `/api`, `/api/...`; `/apix` is not under `/api`
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.path
    }
}

/// Matches a mount prefix on a segment boundary.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Path below the mount point, always starting with `/`.
    ///
    /// Returns None when the path is not under the prefix.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.prefix == "/" {
            return path.starts_with('/').then_some(path);
        }
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        self.strip(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPathMatcher::new("/service-worker.js");
        assert!(matcher.matches("/service-worker.js"));
        assert!(!matcher.matches("/service-worker.js.map"));
        assert!(!matcher.matches("/static/service-worker.js"));
    }

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api");

        assert!(matcher.matches("/api/v1"));
        assert!(matcher.matches("/api"));
        assert!(!matcher.matches("/images"));
        assert!(!matcher.matches("/apiary"));
        assert!(!matcher.matches("/API/v1")); // Case sensitive
    }

    #[test]
    fn strip_yields_remainder() {
        let matcher = PathPrefixMatcher::new("/api");
        assert_eq!(matcher.strip("/api/v1/users"), Some("/v1/users"));
        assert_eq!(matcher.strip("/api"), Some("/"));
        assert_eq!(matcher.strip("/api/"), Some("/"));
        assert_eq!(matcher.strip("/apiary"), None);
    }
}
