//! Session store: the single writer for the browser session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and guards only read `snapshot()`. Every mutation goes through
//! `hydrate`, `login`, `logout` and `refresh_access_token`, which also keep
//! the persisted token pair in step with memory.
//!
//! DESIGN
//! ======
//! Operations return outcome values (`Navigate`, `HydrateOutcome`,
//! `RefreshOutcome`) instead of navigating, so the store knows nothing about
//! the router and runs against fake backends in tests.
//!
//! The in-memory lock is never held across an `.await`. Each logout or login
//! bumps an epoch counter; a hydrate, login or refresh that resumes after the
//! epoch moved discards its result instead of resurrecting a session the user
//! has already left, or tearing down one that started later.
//!
//! ERROR HANDLING
//! ==============
//! Network failures never escape as panics. `login` reports a
//! `SessionError`; `hydrate` and `refresh_access_token` degrade to a full
//! logout and only log.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, warn};

use crate::error::SessionError;
use crate::net::auth::{AuthBackend, HttpAuthBackend};
use crate::state::auth::{AuthPhase, Credentials, Identity, Navigate, Role, Session};
use crate::util::storage::{BrowserCredentialStore, CredentialStore};

/// The store wired to the real backend and `localStorage`.
pub type BrowserSessionStore = SessionStore<HttpAuthBackend, BrowserCredentialStore>;

/// Result of `SessionStore::hydrate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HydrateOutcome {
    Authenticated(Role),
    Unauthenticated,
    /// Hydration already ran (or is running); nothing was done.
    AlreadyHydrated,
}

/// Result of `SessionStore::refresh_access_token`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    /// The refresh failed and the session was logged out.
    LoggedOut { reason: SessionError, navigate: Navigate },
    /// The session changed while the refresh was in flight; its result
    /// (token or failure) was dropped.
    Superseded,
}

pub struct SessionStore<B, S> {
    backend: B,
    storage: S,
    session: RwLock<Session>,
    hydrate_started: AtomicBool,
    epoch: AtomicU64,
}

impl<B, S> SessionStore<B, S>
where
    B: AuthBackend,
    S: CredentialStore,
{
    pub fn new(backend: B, storage: S) -> Self {
        Self {
            backend,
            storage,
            session: RwLock::new(Session::new()),
            hydrate_started: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn phase(&self) -> AuthPhase {
        self.read().phase()
    }

    pub fn is_initializing(&self) -> bool {
        self.read().initializing
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Restore the session from persisted credentials. Runs at most once.
    pub async fn hydrate(&self) -> HydrateOutcome {
        if self.hydrate_started.swap(true, Ordering::AcqRel) {
            debug!("session: hydrate skipped, already started");
            return HydrateOutcome::AlreadyHydrated;
        }

        let Some(credentials) = self.storage.load() else {
            // Drops any half-written pair left by an older tab.
            self.storage.clear();
            self.finish_hydration(None);
            debug!("session: no stored credentials");
            return HydrateOutcome::Unauthenticated;
        };

        let epoch = self.current_epoch();
        match self.backend.fetch_identity(&credentials.access).await {
            Ok(identity) if self.current_epoch() == epoch => {
                let role = identity.role;
                info!("session: restored user_id={} role={}", identity.id, role.as_str());
                self.finish_hydration(Some((identity, credentials)));
                HydrateOutcome::Authenticated(role)
            }
            Ok(_) => {
                debug!("session: hydrate result discarded after logout");
                self.finish_hydration(None);
                HydrateOutcome::Unauthenticated
            }
            Err(e) => {
                warn!("session: hydrate failed, clearing credentials error={e}");
                self.storage.clear();
                self.finish_hydration(None);
                HydrateOutcome::Unauthenticated
            }
        }
    }

    fn finish_hydration(&self, restored: Option<(Identity, Credentials)>) {
        let mut session = self.write();
        match restored {
            Some((identity, credentials)) => {
                session.identity = Some(identity);
                session.credentials = Some(credentials);
            }
            None => session.clear(),
        }
        session.initializing = false;
    }

    /// Sign in with username/password.
    ///
    /// # Errors
    ///
    /// `Initializing` before hydration finished, `AuthFailure` for refused
    /// credentials, `Superseded` when a logout landed mid-flight,
    /// `TransientNetwork` otherwise. On error the session and persisted
    /// credentials are exactly as the last committed operation left them.
    pub async fn login(&self, username: &str, password: &str) -> Result<Navigate, SessionError> {
        if self.is_initializing() {
            return Err(SessionError::Initializing);
        }

        let epoch = self.current_epoch();
        let pair = self.backend.obtain_token_pair(username, password).await.map_err(|e| {
            info!("session: login rejected username={username} error={e}");
            SessionError::from_login(e)
        })?;
        if self.current_epoch() != epoch {
            debug!("session: token pair discarded after logout");
            return Err(SessionError::Superseded);
        }

        let credentials = Credentials { access: pair.access, refresh: pair.refresh };
        let previous = self.read().credentials.clone();
        self.storage.save(&credentials);

        let fetched = self.backend.fetch_identity(&credentials.access).await;
        if self.current_epoch() != epoch {
            // The logout (or a newer login) already owns storage.
            debug!("session: login discarded after logout");
            return Err(SessionError::Superseded);
        }
        let identity = match fetched {
            Ok(identity) => identity,
            Err(e) => {
                warn!("session: identity fetch after login failed error={e}");
                match &previous {
                    Some(previous) => self.storage.save(previous),
                    None => self.storage.clear(),
                }
                return Err(SessionError::TransientNetwork(e));
            }
        };

        info!("session: login user_id={} role={}", identity.id, identity.role.as_str());
        self.bump_epoch();
        let mut session = self.write();
        session.identity = Some(identity);
        session.credentials = Some(credentials);
        Ok(Navigate::Home)
    }

    /// Drop the session and its persisted credentials. Idempotent.
    pub fn logout(&self) -> Navigate {
        self.bump_epoch();
        self.storage.clear();
        self.write().clear();
        debug!("session: logged out");
        Navigate::Login
    }

    /// Swap the access token using the stored refresh token.
    pub async fn refresh_access_token(&self) -> RefreshOutcome {
        let Some(refresh) = self.storage.load().map(|c| c.refresh) else {
            warn!("session: refresh without stored credentials, logging out");
            let navigate = self.logout();
            return RefreshOutcome::LoggedOut { reason: SessionError::SessionExpired, navigate };
        };

        let epoch = self.current_epoch();
        match self.backend.refresh_access(&refresh).await {
            Ok(_) if self.current_epoch() != epoch => {
                debug!("session: refreshed token discarded after logout");
                RefreshOutcome::Superseded
            }
            Ok(access) => {
                self.storage.save_access(&access);
                if let Some(credentials) = self.write().credentials.as_mut() {
                    credentials.access = access;
                }
                debug!("session: access token refreshed");
                RefreshOutcome::Refreshed
            }
            Err(e) if self.current_epoch() != epoch => {
                debug!("session: stale refresh failure ignored error={e}");
                RefreshOutcome::Superseded
            }
            Err(e) => {
                warn!("session: refresh failed, logging out error={e}");
                let navigate = self.logout();
                RefreshOutcome::LoggedOut { reason: SessionError::from_refresh(e), navigate }
            }
        }
    }
}
