//! Auth-session model for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by route guards and identity-aware components; written only by the
//! session store in `state::session`.
//!
//! DESIGN
//! ======
//! Access and refresh tokens live in one `Credentials` pair, so a session is
//! either fully logged in or fully logged out.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

/// Role reported by `GET /api/user/`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    /// Anything the backend reports that this client does not recognize.
    #[default]
    #[serde(other)]
    Guest,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Guest => "guest",
        }
    }
}

/// The authenticated user as returned by `GET /api/user/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    /// Name shown in the header; falls back to the numeric id.
    pub fn display_name(&self) -> String {
        if self.username.trim().is_empty() {
            format!("user #{}", self.id)
        } else {
            self.username.clone()
        }
    }
}

/// Bearer credential pair issued by `POST /api/token/`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access: String,
    pub refresh: String,
}

// Tokens never reach logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Where the caller should send the user after a session operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigate {
    Home,
    Login,
}

impl Navigate {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
        }
    }
}

/// Coarse auth phase derived from a `Session`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Initializing,
    Authenticated(Role),
    Unauthenticated,
}

/// Snapshot of the browser session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub credentials: Option<Credentials>,
    /// True until the first hydration attempt completes.
    pub initializing: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Empty session as created at startup, before hydration.
    pub fn new() -> Self {
        Self { identity: None, credentials: None, initializing: true }
    }

    pub fn phase(&self) -> AuthPhase {
        if self.initializing {
            return AuthPhase::Initializing;
        }
        match &self.identity {
            Some(identity) => AuthPhase::Authenticated(identity.role),
            None => AuthPhase::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase(), AuthPhase::Authenticated(_))
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }

    pub(crate) fn clear(&mut self) {
        self.identity = None;
        self.credentials = None;
    }
}
