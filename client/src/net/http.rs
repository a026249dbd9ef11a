//! Shared request plumbing for every REST call.
//!
//! SYSTEM CONTEXT
//! ==============
//! All outgoing requests go through `get_json`/`post_json`/`post` so the
//! cross-cutting headers are applied in one place: `Content-Type`, the
//! `X-CSRFToken` echoed from the `csrftoken` cookie, and
//! `Authorization: Bearer <accessToken>` whenever a token is available.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with `ApiError::Unavailable`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
#[cfg(any(test, feature = "hydrate"))]
use crate::util::storage::{BrowserCredentialStore, CredentialStore};

/// Which bearer token, if any, a request carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bearer<'a> {
    /// Whatever access token is currently persisted.
    Stored,
    /// An explicit token, used by the session store before it persists one.
    Token(&'a str),
    None,
}

#[cfg(any(test, feature = "hydrate"))]
impl Bearer<'_> {
    fn resolve(self) -> Option<String> {
        match self {
            Self::Stored => BrowserCredentialStore.access_token(),
            Self::Token(token) => Some(token.to_owned()),
            Self::None => None,
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
/// Header set for a request.
pub(crate) fn request_headers(access: Option<&str>, csrf: Option<&str>) -> Vec<(&'static str, String)> {
    let mut headers = vec![("Content-Type", "application/json".to_owned())];
    if let Some(token) = csrf.filter(|t| !t.is_empty()) {
        headers.push(("X-CSRFToken", token.to_owned()));
    }
    if let Some(token) = access.filter(|t| !t.is_empty()) {
        headers.push(("Authorization", format!("Bearer {token}")));
    }
    headers
}

#[cfg(any(test, feature = "hydrate"))]
/// Extract the Django `csrftoken` value from a `document.cookie` string.
pub(crate) fn csrf_from_cookie(cookie: &str) -> Option<String> {
    cookie
        .split(';')
        .map(str::trim)
        .find_map(|row| row.strip_prefix("csrftoken="))
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

#[cfg(any(test, feature = "hydrate"))]
/// Query pairs with empty values dropped, so unset filters are not sent.
pub(crate) fn non_empty_query<'a>(pairs: &[(&'a str, String)]) -> Vec<(&'a str, String)> {
    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (*key, value.clone()))
        .collect()
}

#[cfg(feature = "hydrate")]
fn document_cookie() -> Option<String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()?.document()?;
    document.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()
}

#[cfg(feature = "hydrate")]
fn prepare(builder: gloo_net::http::RequestBuilder, bearer: Bearer<'_>) -> gloo_net::http::RequestBuilder {
    let csrf = document_cookie().as_deref().and_then(csrf_from_cookie);
    let access = bearer.resolve();
    request_headers(access.as_deref(), csrf.as_deref())
        .into_iter()
        .fold(builder, |builder, (name, value)| builder.header(name, &value))
}

#[cfg(feature = "hydrate")]
async fn dispatch(
    builder: gloo_net::http::RequestBuilder,
    body: Option<&serde_json::Value>,
) -> Result<gloo_net::http::Response, ApiError> {
    let request = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Transport(e.to_string()))?;
    let resp = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(ApiError::Status { status: resp.status() });
    }
    Ok(resp)
}

/// `GET` a JSON document.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, non-2xx status, or a body that
/// does not decode as `T`.
pub async fn get_json<T: DeserializeOwned>(
    config: &ApiConfig,
    path: &str,
    query: &[(&str, String)],
    bearer: Bearer<'_>,
) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let query = non_empty_query(query);
        let builder = gloo_net::http::Request::get(&config.url(path)).query(query);
        let resp = dispatch(prepare(builder, bearer), None).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, path, query, bearer);
        Err(ApiError::Unavailable)
    }
}

/// `POST` a JSON body and decode a JSON response.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, non-2xx status, or a body that
/// does not decode as `T`.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    config: &ApiConfig,
    path: &str,
    body: &B,
    bearer: Bearer<'_>,
) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let builder = gloo_net::http::Request::post(&config.url(path));
        let resp = dispatch(prepare(builder, bearer), Some(&body)).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, path, body, bearer);
        Err(ApiError::Unavailable)
    }
}

/// `POST` where only the status matters.
///
/// # Errors
///
/// Returns `ApiError` on transport failure or a non-2xx status.
pub async fn post<B: Serialize>(
    config: &ApiConfig,
    path: &str,
    body: Option<&B>,
    bearer: Bearer<'_>,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let builder = gloo_net::http::Request::post(&config.url(path));
        dispatch(prepare(builder, bearer), body.as_ref()).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, path, body, bearer);
        Err(ApiError::Unavailable)
    }
}
