//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, routing
//! guards, formatting) from page and component logic.

pub mod auth;
pub mod format;
pub mod guard;
pub mod storage;
