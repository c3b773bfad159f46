//! Path rewrite for forwarded requests.
//!
//! The rewrite touches the path portion only. The query string is split off at
//! the first `?` and reattached byte for byte.

use regex::Regex;

use crate::config::RewriteConfig;

/// A compiled single-substitution rewrite rule.
#[derive(Debug, Clone)]
pub struct PathRewrite {
    pattern: Regex,
    replacement: String,
}

impl PathRewrite {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Build the rule from config. Returns None when the rewrite is disabled.
    pub fn from_config(config: &RewriteConfig) -> Result<Option<Self>, regex::Error> {
        if !config.enabled {
            return Ok(None);
        }
        Self::new(&config.pattern, config.replacement.clone()).map(Some)
    }

    /// Replace the first match in `path`. Output is not re-scanned.
    pub fn apply<'a>(&self, path: &'a str) -> std::borrow::Cow<'a, str> {
        self.pattern.replace(path, self.replacement.as_str())
    }
}

/// Resolve the outgoing path and query for a forwarded request.
pub fn resolve_path(path_and_query: &str, rewrite: Option<&PathRewrite>) -> String {
    let (path, query) = match path_and_query.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_and_query, None),
    };

    let path = match rewrite {
        Some(rule) => rule.apply(path),
        None => path.into(),
    };

    match query {
        Some(query) => format!("{path}?{query}"),
        None => path.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1() -> PathRewrite {
        PathRewrite::from_config(&RewriteConfig::default())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn rewrites_first_segment_and_keeps_query() {
        assert_eq!(
            resolve_path("/v1/users?active=true", Some(&v1())),
            "/api/v1/users?active=true"
        );
    }

    #[test]
    fn only_first_occurrence_is_rewritten() {
        assert_eq!(resolve_path("/foo/v1/v1/bar", Some(&v1())), "/foo/api/v1/v1/bar");
    }

    #[test]
    fn query_is_never_rewritten() {
        assert_eq!(
            resolve_path("/users?version=v1&next=a?b", Some(&v1())),
            "/users?version=v1&next=a?b"
        );
    }

    #[test]
    fn empty_query_survives() {
        assert_eq!(resolve_path("/v1/items?", Some(&v1())), "/api/v1/items?");
    }

    #[test]
    fn paths_without_match_pass_through() {
        assert_eq!(resolve_path("/health", Some(&v1())), "/health");
        assert_eq!(resolve_path("/v1/users?x=1", None), "/v1/users?x=1");
    }

    #[test]
    fn rewrite_is_applied_once() {
        // The replacement contains the pattern; a second pass would nest it.
        let rule = v1();
        let once = resolve_path("/v1", Some(&rule));
        assert_eq!(once, "/api/v1");
    }

    #[test]
    fn disabled_rule_builds_nothing() {
        let config = RewriteConfig {
            enabled: false,
            ..RewriteConfig::default()
        };
        assert!(PathRewrite::from_config(&config).unwrap().is_none());
    }
}
