//! Client configuration from environment variables.

use std::env;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Optional JSON-lines request log.
    pub log_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_path: None,
        }
    }
}

impl ClientConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        let base_url = env::var("LINEFALL_API_URL")
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let log_path = env::var("LINEFALL_API_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self { base_url, log_path }
    }

    /// Check if networking is disabled via environment.
    pub fn offline() -> bool {
        env::var("LINEFALL_OFFLINE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}
