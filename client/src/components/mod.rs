//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome (header, pager, rating line) and the route
//! guard wrapper, reading session state from Leptos context.

pub mod header;
pub mod pager;
pub mod protected_route;
pub mod review_stars;
