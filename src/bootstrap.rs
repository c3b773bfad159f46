//! Client bootstrap flags.
//!
//! Values the single-page application receives at startup, read from the
//! same environment the bundle was configured with.

use serde::Serialize;

use crate::config::loader::split_list;

pub const IFRAME_URL_ENV: &str = "ELM_APP_FUTUCORTEX_IFRAME_URL";
pub const IFRAME_VIEWERS_ENV: &str = "ELM_APP_FUTUCORTEX_IFRAME_VIEWERS";

/// Flags handed to the client application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFlags {
    pub iframe_url: Option<String>,
    pub iframe_viewers: Vec<String>,
}

impl ClientFlags {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            iframe_url: lookup(IFRAME_URL_ENV).filter(|v| !v.trim().is_empty()),
            iframe_viewers: lookup(IFRAME_VIEWERS_ENV)
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_url_and_viewer_list() {
        let flags = ClientFlags::from_lookup(|key| match key {
            IFRAME_URL_ENV => Some("https://cortex.example/embed".into()),
            IFRAME_VIEWERS_ENV => Some("alice@example.com, bob@example.com,".into()),
            _ => None,
        });
        assert_eq!(flags.iframe_url.as_deref(), Some("https://cortex.example/embed"));
        assert_eq!(flags.iframe_viewers, vec!["alice@example.com", "bob@example.com"]);
    }

    #[test]
    fn missing_values_are_empty() {
        assert_eq!(ClientFlags::from_lookup(|_| None), ClientFlags::default());
    }

    #[test]
    fn serializes_camel_case() {
        let flags = ClientFlags {
            iframe_url: None,
            iframe_viewers: vec!["v".into()],
        };
        assert_eq!(
            serde_json::to_value(&flags).unwrap(),
            serde_json::json!({ "iframeUrl": null, "iframeViewers": ["v"] })
        );
    }
}
