use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::executor::block_on;
use futures::join;

use super::*;
use crate::error::ApiError;
use crate::net::types::TokenPair;
use crate::util::guard::{GuardOutcome, evaluate};

// =============================================================
// Fakes
// =============================================================

/// Returns `Pending` the given number of times, so a concurrently joined
/// future gets to run in between.
struct Yield(usize);

impl Future for Yield {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 == 0 {
            return Poll::Ready(());
        }
        self.0 -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

#[derive(Default)]
struct FakeBackend {
    tokens: RefCell<Option<Result<(String, String), ApiError>>>,
    identity: RefCell<Option<Result<Identity, ApiError>>>,
    refresh: RefCell<Option<Result<String, ApiError>>>,
    identity_calls: Cell<usize>,
    seen_access: RefCell<Vec<String>>,
    identity_yields: Cell<usize>,
    refresh_yields: Cell<usize>,
}

impl FakeBackend {
    fn accepting(access: &str, refresh: &str, identity: Identity) -> Self {
        let backend = Self::default();
        backend.tokens.replace(Some(Ok((access.to_owned(), refresh.to_owned()))));
        backend.identity.replace(Some(Ok(identity)));
        backend
    }

    fn offline() -> ApiError {
        ApiError::Transport("offline".to_owned())
    }
}

#[async_trait(?Send)]
impl AuthBackend for FakeBackend {
    async fn obtain_token_pair(&self, _username: &str, _password: &str) -> Result<TokenPair, ApiError> {
        match self.tokens.borrow().clone() {
            Some(Ok((access, refresh))) => Ok(TokenPair { access, refresh }),
            Some(Err(e)) => Err(e),
            None => Err(Self::offline()),
        }
    }

    async fn fetch_identity(&self, access: &str) -> Result<Identity, ApiError> {
        self.identity_calls.set(self.identity_calls.get() + 1);
        self.seen_access.borrow_mut().push(access.to_owned());
        Yield(self.identity_yields.get()).await;
        self.identity.borrow().clone().unwrap_or_else(|| Err(Self::offline()))
    }

    async fn refresh_access(&self, _refresh: &str) -> Result<String, ApiError> {
        Yield(self.refresh_yields.get()).await;
        self.refresh.borrow().clone().unwrap_or_else(|| Err(Self::offline()))
    }
}

#[derive(Default)]
struct MemoryStore {
    access: RefCell<Option<String>>,
    refresh: RefCell<Option<String>>,
}

impl MemoryStore {
    fn with(access: &str, refresh: &str) -> Self {
        Self { access: RefCell::new(Some(access.to_owned())), refresh: RefCell::new(Some(refresh.to_owned())) }
    }

    fn raw(&self) -> (Option<String>, Option<String>) {
        (self.access.borrow().clone(), self.refresh.borrow().clone())
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<Credentials> {
        crate::util::storage::pair_from_raw(self.access.borrow().clone(), self.refresh.borrow().clone())
    }

    fn save(&self, credentials: &Credentials) {
        self.access.replace(Some(credentials.access.clone()));
        self.refresh.replace(Some(credentials.refresh.clone()));
    }

    fn save_access(&self, access: &str) {
        self.access.replace(Some(access.to_owned()));
    }

    fn clear(&self) {
        self.access.replace(None);
        self.refresh.replace(None);
    }
}

fn admin() -> Identity {
    Identity { id: 1, username: "admin".to_owned(), role: Role::Admin }
}

fn user() -> Identity {
    Identity { id: 2, username: "bob".to_owned(), role: Role::User }
}

fn pair_invariant_holds(store: &SessionStore<FakeBackend, MemoryStore>) -> bool {
    let (access, refresh) = store.storage().raw();
    access.is_some() == refresh.is_some()
}

/// Store that has finished hydration with nothing persisted.
fn ready_store(backend: FakeBackend) -> SessionStore<FakeBackend, MemoryStore> {
    let store = SessionStore::new(backend, MemoryStore::default());
    block_on(store.hydrate());
    store
}

// =============================================================
// hydrate
// =============================================================

#[test]
fn fresh_start_hydrates_to_unauthenticated() {
    let store = SessionStore::new(FakeBackend::default(), MemoryStore::default());
    assert!(store.is_initializing());

    assert_eq!(block_on(store.hydrate()), HydrateOutcome::Unauthenticated);

    let session = store.snapshot();
    assert!(!session.initializing);
    assert_eq!(session.phase(), AuthPhase::Unauthenticated);
    assert_eq!(store.backend.identity_calls.get(), 0);
}

#[test]
fn hydrate_restores_identity_from_stored_tokens() {
    let backend = FakeBackend::accepting("a0", "r0", admin());
    let store = SessionStore::new(backend, MemoryStore::with("a0", "r0"));

    assert_eq!(block_on(store.hydrate()), HydrateOutcome::Authenticated(Role::Admin));

    let session = store.snapshot();
    assert_eq!(session.identity, Some(admin()));
    assert_eq!(session.credentials, Some(Credentials { access: "a0".to_owned(), refresh: "r0".to_owned() }));
    assert_eq!(store.backend.seen_access.borrow().as_slice(), ["a0".to_owned()]);
}

#[test]
fn hydrate_failure_forces_logout() {
    let backend = FakeBackend::default();
    backend.identity.replace(Some(Err(ApiError::Status { status: 401 })));
    let store = SessionStore::new(backend, MemoryStore::with("stale", "stale-r"));

    assert_eq!(block_on(store.hydrate()), HydrateOutcome::Unauthenticated);

    assert_eq!(store.storage().raw(), (None, None));
    assert!(!store.is_initializing());
    assert_eq!(store.phase(), AuthPhase::Unauthenticated);
}

#[test]
fn hydrate_network_failure_also_clears() {
    let store = SessionStore::new(FakeBackend::default(), MemoryStore::with("a", "r"));
    assert_eq!(block_on(store.hydrate()), HydrateOutcome::Unauthenticated);
    assert_eq!(store.storage().raw(), (None, None));
}

#[test]
fn hydrate_runs_only_once() {
    let backend = FakeBackend::accepting("a0", "r0", user());
    let store = SessionStore::new(backend, MemoryStore::with("a0", "r0"));

    block_on(store.hydrate());
    assert_eq!(block_on(store.hydrate()), HydrateOutcome::AlreadyHydrated);
    assert_eq!(store.backend.identity_calls.get(), 1);
}

#[test]
fn hydrate_after_logout_stays_noop() {
    let store = ready_store(FakeBackend::default());
    store.logout();
    assert_eq!(block_on(store.hydrate()), HydrateOutcome::AlreadyHydrated);
    assert!(!store.is_initializing());
}

#[test]
fn hydrate_discards_half_pair() {
    let storage = MemoryStore::default();
    storage.access.replace(Some("lonely".to_owned()));
    let store = SessionStore::new(FakeBackend::default(), storage);

    assert_eq!(block_on(store.hydrate()), HydrateOutcome::Unauthenticated);
    assert_eq!(store.storage().raw(), (None, None));
}

// =============================================================
// login
// =============================================================

#[test]
fn login_admin_authenticates_and_navigates_home() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", admin()));

    assert_eq!(block_on(store.login("admin", "goodpass")), Ok(Navigate::Home));

    let session = store.snapshot();
    assert_eq!(session.phase(), AuthPhase::Authenticated(Role::Admin));
    assert_eq!(session.role(), Some(Role::Admin));
    assert_eq!(store.storage().raw(), (Some("a1".to_owned()), Some("r1".to_owned())));
    assert_eq!(evaluate(Some(Role::Admin), &session), GuardOutcome::Allow);
}

#[test]
fn login_uses_new_access_token_for_identity() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", user()));
    block_on(store.login("bob", "pw")).unwrap();
    assert_eq!(store.backend.seen_access.borrow().last().map(String::as_str), Some("a1"));
}

#[test]
fn login_bad_credentials_reports_auth_failure() {
    let backend = FakeBackend::default();
    backend.tokens.replace(Some(Err(ApiError::Status { status: 401 })));
    let store = ready_store(backend);

    assert_eq!(block_on(store.login("admin", "wrong")), Err(SessionError::AuthFailure));

    assert_eq!(store.phase(), AuthPhase::Unauthenticated);
    assert_eq!(store.storage().raw(), (None, None));
}

#[test]
fn login_network_failure_is_transient() {
    let store = ready_store(FakeBackend::default());
    let result = block_on(store.login("admin", "pw"));
    assert!(matches!(result, Err(SessionError::TransientNetwork(_))));
    assert_eq!(store.phase(), AuthPhase::Unauthenticated);
}

#[test]
fn login_identity_failure_rolls_back_credentials() {
    let backend = FakeBackend::default();
    backend.tokens.replace(Some(Ok(("a1".to_owned(), "r1".to_owned()))));
    backend.identity.replace(Some(Err(ApiError::Status { status: 500 })));
    let store = ready_store(backend);

    let result = block_on(store.login("admin", "pw"));

    assert_eq!(result, Err(SessionError::TransientNetwork(ApiError::Status { status: 500 })));
    assert_eq!(store.storage().raw(), (None, None));
    assert!(store.snapshot().identity.is_none());
}

#[test]
fn failed_relogin_keeps_existing_session() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", user()));
    block_on(store.login("bob", "pw")).unwrap();

    store.backend.tokens.replace(Some(Ok(("a2".to_owned(), "r2".to_owned()))));
    store.backend.identity.replace(Some(Err(FakeBackend::offline())));
    assert!(block_on(store.login("other", "pw")).is_err());

    assert_eq!(store.snapshot().identity, Some(user()));
    assert_eq!(store.storage().raw(), (Some("a1".to_owned()), Some("r1".to_owned())));
}

#[test]
fn login_refused_while_initializing() {
    let store = SessionStore::new(FakeBackend::accepting("a1", "r1", admin()), MemoryStore::default());
    assert_eq!(block_on(store.login("admin", "goodpass")), Err(SessionError::Initializing));
    assert_eq!(store.phase(), AuthPhase::Initializing);
    assert_eq!(store.storage().raw(), (None, None));
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_everything_and_navigates_to_login() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", admin()));
    block_on(store.login("admin", "goodpass")).unwrap();

    assert_eq!(store.logout(), Navigate::Login);

    assert_eq!(store.phase(), AuthPhase::Unauthenticated);
    assert!(store.snapshot().credentials.is_none());
    assert_eq!(store.storage().raw(), (None, None));
}

#[test]
fn logout_is_idempotent() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", user()));
    block_on(store.login("bob", "pw")).unwrap();

    store.logout();
    let once = (store.snapshot(), store.storage().raw());
    store.logout();
    let twice = (store.snapshot(), store.storage().raw());

    assert_eq!(once, twice);
}

#[test]
fn logout_without_session_is_harmless() {
    let store = ready_store(FakeBackend::default());
    assert_eq!(store.logout(), Navigate::Login);
    assert_eq!(store.phase(), AuthPhase::Unauthenticated);
}

#[test]
fn credential_pair_invariant_holds_across_login_logout_sequences() {
    let backend = FakeBackend::accepting("a1", "r1", user());
    let store = ready_store(backend);

    for step in 0..6 {
        if step % 3 == 2 {
            store.backend.tokens.replace(Some(Err(ApiError::Status { status: 400 })));
        } else {
            store.backend.tokens.replace(Some(Ok((format!("a{step}"), format!("r{step}")))));
        }
        let _ = block_on(store.login("bob", "pw"));
        assert!(pair_invariant_holds(&store), "after login step {step}");
        let session = store.snapshot();
        assert_eq!(session.identity.is_some(), session.credentials.is_some());

        if step % 2 == 1 {
            store.logout();
            assert!(pair_invariant_holds(&store), "after logout step {step}");
        }
    }
}

// =============================================================
// refresh_access_token
// =============================================================

#[test]
fn refresh_replaces_only_access_token() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", admin()));
    block_on(store.login("admin", "goodpass")).unwrap();
    store.backend.refresh.replace(Some(Ok("a2".to_owned())));

    assert_eq!(block_on(store.refresh_access_token()), RefreshOutcome::Refreshed);

    let session = store.snapshot();
    assert_eq!(session.identity, Some(admin()));
    assert_eq!(session.credentials, Some(Credentials { access: "a2".to_owned(), refresh: "r1".to_owned() }));
    assert_eq!(store.storage().raw(), (Some("a2".to_owned()), Some("r1".to_owned())));
}

#[test]
fn rejected_refresh_logs_out() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", admin()));
    block_on(store.login("admin", "goodpass")).unwrap();
    store.backend.refresh.replace(Some(Err(ApiError::Status { status: 401 })));

    let outcome = block_on(store.refresh_access_token());

    assert_eq!(
        outcome,
        RefreshOutcome::LoggedOut { reason: SessionError::SessionExpired, navigate: Navigate::Login }
    );
    assert!(store.snapshot().identity.is_none());
    assert_eq!(store.storage().raw(), (None, None));
    assert_eq!(store.phase(), AuthPhase::Unauthenticated);
}

#[test]
fn refresh_network_failure_also_logs_out() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", user()));
    block_on(store.login("bob", "pw")).unwrap();

    let outcome = block_on(store.refresh_access_token());

    assert!(matches!(
        outcome,
        RefreshOutcome::LoggedOut { reason: SessionError::TransientNetwork(_), .. }
    ));
    assert!(store.snapshot().identity.is_none());
    assert_eq!(store.storage().raw(), (None, None));
}

#[test]
fn refresh_without_stored_token_logs_out() {
    let store = ready_store(FakeBackend::default());
    let outcome = block_on(store.refresh_access_token());
    assert!(matches!(outcome, RefreshOutcome::LoggedOut { .. }));
    assert_eq!(store.phase(), AuthPhase::Unauthenticated);
}

#[test]
fn route_guard_redirects_after_failed_refresh() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", admin()));
    block_on(store.login("admin", "goodpass")).unwrap();
    store.backend.refresh.replace(Some(Err(ApiError::Status { status: 401 })));
    block_on(store.refresh_access_token());

    assert_eq!(evaluate(Some(Role::Admin), &store.snapshot()), GuardOutcome::RedirectToLogin);
}

// =============================================================
// Interleaving with logout
// =============================================================

#[test]
fn logout_during_login_wins() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", admin()));
    store.backend.identity_yields.set(1);

    let (result, navigate) = block_on(async { join!(store.login("admin", "goodpass"), async { store.logout() }) });

    assert_eq!(result, Err(SessionError::Superseded));
    assert_eq!(navigate, Navigate::Login);
    assert_eq!(store.phase(), AuthPhase::Unauthenticated);
    assert!(store.snapshot().credentials.is_none());
    assert_eq!(store.storage().raw(), (None, None));
}

#[test]
fn logout_during_relogin_does_not_restore_previous_pair() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", user()));
    block_on(store.login("bob", "pw")).unwrap();
    store.backend.tokens.replace(Some(Ok(("a2".to_owned(), "r2".to_owned()))));
    store.backend.identity_yields.set(1);

    let (result, _) = block_on(async { join!(store.login("bob", "pw"), async { store.logout() }) });

    assert_eq!(result, Err(SessionError::Superseded));
    assert!(store.snapshot().identity.is_none());
    assert_eq!(store.storage().raw(), (None, None));
    assert!(pair_invariant_holds(&store));
}

#[test]
fn hydrate_result_discarded_after_logout() {
    let backend = FakeBackend::accepting("a0", "r0", admin());
    backend.identity_yields.set(1);
    let store = SessionStore::new(backend, MemoryStore::with("a0", "r0"));

    let (outcome, _) = block_on(async { join!(store.hydrate(), async { store.logout() }) });

    assert_eq!(outcome, HydrateOutcome::Unauthenticated);
    let session = store.snapshot();
    assert!(!session.initializing);
    assert!(session.identity.is_none());
    assert_eq!(store.storage().raw(), (None, None));
}

#[test]
fn refreshed_token_dropped_after_logout() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", admin()));
    block_on(store.login("admin", "goodpass")).unwrap();
    store.backend.refresh.replace(Some(Ok("a2".to_owned())));
    store.backend.refresh_yields.set(1);

    let (outcome, _) = block_on(async { join!(store.refresh_access_token(), async { store.logout() }) });

    assert_eq!(outcome, RefreshOutcome::Superseded);
    assert!(store.snapshot().credentials.is_none());
    assert_eq!(store.storage().raw(), (None, None));
}

#[test]
fn stale_refresh_failure_spares_newer_login() {
    let store = ready_store(FakeBackend::accepting("a1", "r1", admin()));
    block_on(store.login("admin", "goodpass")).unwrap();
    store.backend.tokens.replace(Some(Ok(("a2".to_owned(), "r2".to_owned()))));
    store.backend.refresh.replace(Some(Err(ApiError::Status { status: 401 })));
    store.backend.refresh_yields.set(1);

    let (outcome, login) = block_on(async { join!(store.refresh_access_token(), store.login("admin", "goodpass")) });

    assert_eq!(outcome, RefreshOutcome::Superseded);
    assert_eq!(login, Ok(Navigate::Home));
    assert_eq!(store.phase(), AuthPhase::Authenticated(Role::Admin));
    assert_eq!(store.storage().raw(), (Some("a2".to_owned()), Some("r2".to_owned())));
}
