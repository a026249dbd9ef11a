//! Route guard decision.
//!
//! A role mismatch redirects to `/login` just like a missing identity; the
//! app has no separate forbidden screen.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::state::auth::{AuthPhase, Navigate, Role, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session still hydrating; render a placeholder.
    Loading,
    Allow,
    /// No identity present.
    RedirectToLogin,
    /// Identity present but the role does not match.
    DenyRedirect,
}

impl GuardOutcome {
    /// Navigation target for redirecting outcomes.
    pub fn redirect(self) -> Option<Navigate> {
        match self {
            Self::RedirectToLogin | Self::DenyRedirect => Some(Navigate::Login),
            Self::Loading | Self::Allow => None,
        }
    }
}

/// Decide whether `session` may view a screen requiring `required`.
pub fn evaluate(required: Option<Role>, session: &Session) -> GuardOutcome {
    match session.phase() {
        AuthPhase::Initializing => GuardOutcome::Loading,
        AuthPhase::Unauthenticated => GuardOutcome::RedirectToLogin,
        AuthPhase::Authenticated(role) => match required {
            Some(required) if required != role => GuardOutcome::DenyRedirect,
            _ => GuardOutcome::Allow,
        },
    }
}
