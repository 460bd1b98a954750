//! Client configuration.
//!
//! The only setting is the API base URL, read from `TODO_API_URL`.

use tracing::debug;

pub const BASE_URL_ENV: &str = "TODO_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:4567/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read `TODO_API_URL`, falling back to the local mock server.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        debug!(base_url = %base_url, "loaded client config");
        Self::new(base_url.trim())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
