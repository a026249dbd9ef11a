//! Client-side state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns authentication; the remaining modules hold page state that
//! is stored in Leptos signals and mutated by the pages.

pub mod admin;
pub mod auth;
pub mod paging;
pub mod product;
pub mod search;
pub mod session;
