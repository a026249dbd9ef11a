//! Token and identity endpoints consumed by the session store.
//!
//! The `AuthBackend` trait is the seam between `SessionStore` and the network;
//! tests drive the store with an in-memory implementation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use async_trait::async_trait;

use super::http::{self, Bearer};
use super::types::{AccessToken, RefreshRequest, TokenPair, TokenRequest};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::state::auth::Identity;

pub const TOKEN_PATH: &str = "/api/token/";
pub const TOKEN_REFRESH_PATH: &str = "/api/token/refresh/";
pub const CURRENT_USER_PATH: &str = "/api/user/";

/// Backend calls needed to run a bearer-token session.
///
/// Futures are `?Send`: they run on the browser's single-threaded executor.
#[async_trait(?Send)]
pub trait AuthBackend {
    /// Exchange username/password for an access/refresh pair.
    async fn obtain_token_pair(&self, username: &str, password: &str) -> Result<TokenPair, ApiError>;

    /// Resolve the identity that owns `access`.
    async fn fetch_identity(&self, access: &str) -> Result<Identity, ApiError>;

    /// Trade a refresh token for a fresh access token.
    async fn refresh_access(&self, refresh: &str) -> Result<String, ApiError>;
}

/// `AuthBackend` over HTTP.
#[derive(Clone, Debug, Default)]
pub struct HttpAuthBackend {
    config: ApiConfig,
}

impl HttpAuthBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl AuthBackend for HttpAuthBackend {
    async fn obtain_token_pair(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        http::post_json(&self.config, TOKEN_PATH, &TokenRequest { username, password }, Bearer::None).await
    }

    async fn fetch_identity(&self, access: &str) -> Result<Identity, ApiError> {
        http::get_json(&self.config, CURRENT_USER_PATH, &[], Bearer::Token(access)).await
    }

    async fn refresh_access(&self, refresh: &str) -> Result<String, ApiError> {
        let body: AccessToken =
            http::post_json(&self.config, TOKEN_REFRESH_PATH, &RefreshRequest { refresh }, Bearer::None).await?;
        Ok(body.access)
    }
}
