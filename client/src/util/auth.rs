//! Leptos glue around the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionHandle` is provided as context by `App`. It runs store operations
//! and mirrors the resulting snapshot into a signal, so views re-render on
//! login/logout without touching the store directly. Route components share
//! one redirect effect so guard behavior stays identical everywhere.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::error::{ApiError, SessionError};
use crate::state::auth::{Navigate, Role, Session};
use crate::state::session::{BrowserSessionStore, HydrateOutcome, RefreshOutcome};
use crate::util::guard::evaluate;

/// Shared handle to the session store plus a reactive snapshot of it.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<BrowserSessionStore>,
    pub state: RwSignal<Session>,
}

impl SessionHandle {
    pub fn new(store: BrowserSessionStore) -> Self {
        let state = RwSignal::new(store.snapshot());
        Self { store: Arc::new(store), state }
    }

    fn sync(&self) {
        self.state.set(self.store.snapshot());
    }

    pub async fn hydrate(&self) -> HydrateOutcome {
        let outcome = self.store.hydrate().await;
        self.sync();
        outcome
    }

    /// # Errors
    ///
    /// Propagates the store's `SessionError`; the snapshot is synced either way.
    pub async fn login(&self, username: &str, password: &str) -> Result<Navigate, SessionError> {
        let result = self.store.login(username, password).await;
        self.sync();
        result
    }

    pub fn logout(&self) -> Navigate {
        let navigate = self.store.logout();
        self.sync();
        navigate
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let outcome = self.store.refresh_access_token().await;
        self.sync();
        outcome
    }

    /// After a request was refused with 401/403, try one token refresh.
    ///
    /// Returns `true` when the session survived and the request may be
    /// retried by the user. A failed refresh has already logged out.
    pub async fn recover_unauthorized(&self, error: &ApiError) -> bool {
        if !error.is_unauthorized() || !self.state.get_untracked().is_authenticated() {
            return false;
        }
        matches!(self.refresh().await, RefreshOutcome::Refreshed)
    }

    /// Run an API call, retrying it once after a successful token refresh.
    ///
    /// # Errors
    ///
    /// Returns the call's `ApiError` when it fails and no refresh helped.
    pub async fn with_refresh<T, F, Fut>(&self, call: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match call().await {
            Err(error) if self.recover_unauthorized(&error).await => call().await,
            other => other,
        }
    }
}

/// Redirect whenever the guard for `required` says so.
pub fn install_guard_redirect<F>(session: RwSignal<Session>, required: Option<Role>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let outcome = evaluate(required, &session.get());
        if let Some(target) = outcome.redirect() {
            log::debug!("guard: redirect outcome={outcome:?} target={}", target.path());
            navigate(target.path(), NavigateOptions::default());
        }
    });
}
