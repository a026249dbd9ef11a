//! ReviewHub browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! A Leptos single-page app for searching products, reading sentiment-scored
//! reviews and administering the sentiment model. Authentication is a JWT
//! access/refresh pair held by `state::session::SessionStore` and persisted
//! in `localStorage`; admin routes are gated by `util::guard`.
//!
//! Built with `hydrate` for the browser bundle and `ssr` for the host that
//! renders the shell. Without either feature only the pure logic compiles,
//! which is what the unit tests exercise.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
