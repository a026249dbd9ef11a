//! Client error types.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError` describes a single failed request. `SessionError` is the
//! user-facing taxonomy for session operations; every variant leaves the
//! session in a well-defined state.

use thiserror::Error;

/// A failed REST call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, aborted).
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-2xx status.
    #[error("unexpected status {status}")]
    Status { status: u16 },
    /// The response body did not match the expected schema.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// HTTP is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 answers, which mean the bearer token was refused.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// True when the backend rejected the submitted credentials themselves.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self.status(), Some(400 | 401))
    }
}

/// Failure of a session operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Username/password refused by the token endpoint.
    #[error("invalid username or password")]
    AuthFailure,
    /// Refresh token refused; the session has been logged out.
    #[error("session expired, please sign in again")]
    SessionExpired,
    /// The backend could not be reached or answered unexpectedly.
    #[error("backend unavailable: {0}")]
    TransientNetwork(ApiError),
    /// Login attempted before startup hydration finished.
    #[error("session is still initializing")]
    Initializing,
    /// A logout landed while the login was in flight; the new pair was dropped.
    #[error("sign-in cancelled by logout")]
    Superseded,
}

impl SessionError {
    /// Classify a token-endpoint failure during login.
    pub fn from_login(error: ApiError) -> Self {
        if error.is_credential_rejection() {
            Self::AuthFailure
        } else {
            Self::TransientNetwork(error)
        }
    }

    /// Classify a refresh-endpoint failure.
    pub fn from_refresh(error: ApiError) -> Self {
        if error.is_credential_rejection() {
            Self::SessionExpired
        } else {
            Self::TransientNetwork(error)
        }
    }
}
