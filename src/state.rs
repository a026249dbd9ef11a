//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds one pooled HTTP client for the review backend; the host keeps no
//! session data of its own.

use std::sync::Arc;
use std::time::Duration;

use crate::config::HostConfig;
use crate::error::HostError;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    /// Backend origin without a trailing slash.
    pub backend_url: Arc<str>,
    pub max_body_bytes: usize,
}

impl AppState {
    /// # Errors
    ///
    /// Returns `HostError::HttpClient` if the TLS backend cannot initialize.
    pub fn new(config: &HostConfig) -> Result<Self, HostError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http, backend_url: Arc::from(config.backend_url.as_str()), max_body_bytes: config.max_body_bytes })
    }
}
