//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves three things: the `/api/*` proxy to the review
//! backend, the Leptos SSR pages, and the compiled WASM/CSS assets under the
//! Leptos site root.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::error::HostError;
use crate::proxy;
use crate::state::AppState;

/// Proxy and health routes; usable without the Leptos build output.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/{*rest}", any(proxy::forward))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Full host: API proxy + Leptos SSR + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing
/// `[package.metadata.leptos]` section and no `LEPTOS_*` environment).
pub fn app(state: AppState) -> Result<Router, HostError> {
    let conf = get_configuration(None).map_err(|e| HostError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(reviewhub_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || reviewhub_client::app::shell(opts.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(reviewhub_client::app::shell))
        .with_state(leptos_options);

    Ok(api_routes(state)
        .merge(leptos_router)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
