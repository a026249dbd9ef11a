//! Persisted bearer credentials.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only persisted client state is the token pair, kept in `localStorage`
//! under `accessToken` and `refreshToken`. The session store writes it; the
//! HTTP layer reads the access token to build `Authorization` headers.
//!
//! TRADE-OFFS
//! ==========
//! Storage writes are best-effort. A browser that refuses `localStorage` keeps
//! the session in memory only and logs a warning.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use crate::state::auth::Credentials;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Persistence seam for the credential pair.
pub trait CredentialStore {
    /// Both tokens, or `None` when either is missing.
    fn load(&self) -> Option<Credentials>;

    fn save(&self, credentials: &Credentials);

    /// Replace the access token, leaving the refresh token untouched.
    fn save_access(&self, access: &str);

    fn clear(&self);

    fn access_token(&self) -> Option<String> {
        self.load().map(|credentials| credentials.access)
    }
}

/// Pair two raw storage reads into credentials; a half pair counts as none.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn pair_from_raw(access: Option<String>, refresh: Option<String>) -> Option<Credentials> {
    match (access, refresh) {
        (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
            Some(Credentials { access, refresh })
        }
        (None, None) => None,
        _ => {
            log::warn!("storage: incomplete credential pair ignored");
            None
        }
    }
}

/// `localStorage`-backed store. Holds no JS handles, so it is `Send + Sync`
/// and can sit inside shared Leptos context.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCredentialStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(feature = "hydrate")]
fn write_item(storage: &web_sys::Storage, key: &str, value: &str) {
    if storage.set_item(key, value).is_err() {
        log::warn!("storage: write refused key={key}");
    }
}

impl CredentialStore for BrowserCredentialStore {
    fn load(&self) -> Option<Credentials> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage()?;
            let access = storage.get_item(ACCESS_TOKEN_KEY).ok().flatten();
            let refresh = storage.get_item(REFRESH_TOKEN_KEY).ok().flatten();
            pair_from_raw(access, refresh)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, credentials: &Credentials) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("storage: localStorage unavailable, credentials kept in memory");
                return;
            };
            write_item(&storage, ACCESS_TOKEN_KEY, &credentials.access);
            write_item(&storage, REFRESH_TOKEN_KEY, &credentials.refresh);
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
        }
    }

    fn save_access(&self, access: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                write_item(&storage, ACCESS_TOKEN_KEY, access);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
                    if storage.remove_item(key).is_err() {
                        log::warn!("storage: remove refused key={key}");
                    }
                }
            }
        }
    }

    fn access_token(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .get_item(ACCESS_TOKEN_KEY)
                .ok()
                .flatten()
                .filter(|token| !token.is_empty())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}
