//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` applies the shared headers, `auth` drives the token endpoints for
//! the session store, `api` covers catalog/review/admin calls, and `types`
//! defines the wire schema.

pub mod api;
pub mod auth;
pub mod http;
pub mod types;
