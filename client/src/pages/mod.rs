//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped loading and mutation and delegates rendering
//! details to `components`. Admin pages are mounted behind `ProtectedRoute`.

pub mod admin;
pub mod home;
pub mod login;
pub mod models;
pub mod not_found;
pub mod product;
