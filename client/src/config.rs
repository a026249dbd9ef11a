//! Backend location, fixed at build time.
//!
//! By default every request is same-origin (`/api/...`), which is what the
//! bundled host serves. Set `REVIEWHUB_API_BASE` when building the WASM bundle
//! to talk to the backend directly, e.g. `http://localhost:8000` in local
//! development.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Config for an explicit origin. An empty string means same-origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        Self { base_url }
    }

    /// Config baked into this build via `REVIEWHUB_API_BASE`.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("REVIEWHUB_API_BASE").unwrap_or_default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute (or origin-relative) URL for an API path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
