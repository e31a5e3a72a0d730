//! API utilities for frontend-backend communication
//!
//! Resolves where the NexusMind backend lives and how long the client waits
//! for it.

use serde::Deserialize;

/// Port the backend listens on when served next to the client.
pub const DEFAULT_API_PORT: u16 = 8000;

/// Upper bound for a single request. Answer generation is slow, so this is
/// generous; it only exists so a lost request cannot block the chat forever.
pub const DEFAULT_TIMEOUT_MS: u32 = 120_000;

const FALLBACK_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u32,
}

/// Query-string overrides: `?api=http://host:port&timeout_ms=30000`
#[derive(Debug, Default, Deserialize)]
struct ApiOverrides {
    api: Option<String>,
    timeout_ms: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: FALLBACK_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(base_url.into()),
            ..Self::default()
        }
    }

    /// Builds the config from the current window location.
    ///
    /// The backend is expected on the same host at [`DEFAULT_API_PORT`].
    /// Outside a browser this falls back to `http://localhost:8000`.
    pub fn detect() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let location = window.location();
                let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
                let hostname = location
                    .hostname()
                    .unwrap_or_else(|_| "localhost".to_string());
                let search = location.search().unwrap_or_default();
                let base = Self::new(format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT));
                return base.with_query(&search);
            }
        }
        Self::default()
    }

    /// Applies `api` / `timeout_ms` overrides from a location query string.
    /// Unparseable query strings are ignored.
    pub fn with_query(mut self, search: &str) -> Self {
        let overrides: ApiOverrides =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(api) = overrides.api.filter(|a| !a.trim().is_empty()) {
            self.base_url = normalize_base(api);
        }
        if let Some(timeout_ms) = overrides.timeout_ms.filter(|t| *t > 0) {
            self.timeout_ms = timeout_ms;
        }
        self
    }

    /// Build a full API URL from a path
    ///
    /// # Example
    /// ```rust
    /// # use frontend::shared::api_utils::ApiConfig;
    /// let url = ApiConfig::new("http://localhost:8000").url("/files");
    /// assert_eq!(url, "http://localhost:8000/files");
    /// ```
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base(base: String) -> String {
    base.trim().trim_end_matches('/').to_string()
}
