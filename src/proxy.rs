//! Same-origin reverse proxy for the review backend's `/api/*` routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client calls relative `/api/...` URLs. This handler replays
//! each call against `BACKEND_URL` with the method, query, body and end-to-end
//! headers intact, so `Authorization` and `X-CSRFToken` reach the backend
//! unchanged and no CORS configuration is needed.
//!
//! ERROR HANDLING
//! ==============
//! Upstream status codes pass through as-is; the client's session logic
//! depends on seeing the backend's own 401s. Only failures to reach the
//! backend become 502/504 responses generated here.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::state::AppState;

/// Connection-scoped headers that must not be forwarded (RFC 9110 §7.6.1),
/// plus the ones the outgoing client recomputes.
const HOP_BY_HOP: [HeaderName; 10] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
    header::CONTENT_LENGTH,
];

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("request body rejected: {0}")]
    Body(String),
    #[error("backend unreachable: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("invalid backend response: {0}")]
    Response(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) | Self::Response(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

/// Absolute backend URL for an incoming request URI.
pub fn upstream_url(backend_url: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
    format!("{}{path_and_query}", backend_url.trim_end_matches('/'))
}

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name)
}

/// Copy of `headers` without hop-by-hop entries.
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Forward one `/api/*` request to the backend and relay its answer.
///
/// # Errors
///
/// Returns `ProxyError` when the body cannot be read or the backend cannot
/// be reached.
pub async fn forward(State(state): State<AppState>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let url = upstream_url(&state.backend_url, &parts.uri);
    let body = to_bytes(body, state.max_body_bytes).await.map_err(|e| ProxyError::Body(e.to_string()))?;

    let upstream = state
        .http
        .request(parts.method.clone(), &url)
        .headers(forwardable_headers(&parts.headers))
        .body(body)
        .send()
        .await
        .inspect_err(|e| tracing::warn!(method = %parts.method, %url, error = %e, "proxy: backend request failed"))?;

    let status = upstream.status();
    let headers = forwardable_headers(upstream.headers());
    let bytes = upstream.bytes().await?;
    tracing::debug!(method = %parts.method, path = parts.uri.path(), status = status.as_u16(), "proxy: forwarded");

    let mut response = Response::builder()
        .status(status)
        .body(Body::from(bytes))
        .map_err(|e| ProxyError::Response(e.to_string()))?;
    *response.headers_mut() = headers;
    Ok(response)
}
