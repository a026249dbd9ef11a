use super::*;
use crate::state::auth::Identity;

fn signed_in(role: Role) -> Session {
    Session {
        identity: Some(Identity { id: 1, username: "u".to_owned(), role }),
        credentials: None,
        initializing: false,
    }
}

fn signed_out() -> Session {
    Session { initializing: false, ..Session::new() }
}

#[test]
fn initializing_session_yields_loading() {
    assert_eq!(evaluate(None, &Session::new()), GuardOutcome::Loading);
    assert_eq!(evaluate(Some(Role::Admin), &Session::new()), GuardOutcome::Loading);
}

#[test]
fn unauthenticated_redirects_for_any_requirement() {
    for required in [None, Some(Role::User), Some(Role::Admin), Some(Role::Guest)] {
        assert_eq!(evaluate(required, &signed_out()), GuardOutcome::RedirectToLogin);
    }
}

#[test]
fn matching_role_is_allowed() {
    assert_eq!(evaluate(Some(Role::Admin), &signed_in(Role::Admin)), GuardOutcome::Allow);
    assert_eq!(evaluate(Some(Role::User), &signed_in(Role::User)), GuardOutcome::Allow);
}

#[test]
fn no_requirement_allows_any_identity() {
    assert_eq!(evaluate(None, &signed_in(Role::Guest)), GuardOutcome::Allow);
}

#[test]
fn role_mismatch_is_denied() {
    assert_eq!(evaluate(Some(Role::Admin), &signed_in(Role::User)), GuardOutcome::DenyRedirect);
}

#[test]
fn redirects_point_to_login() {
    assert_eq!(GuardOutcome::RedirectToLogin.redirect(), Some(Navigate::Login));
    assert_eq!(GuardOutcome::DenyRedirect.redirect(), Some(Navigate::Login));
    assert_eq!(GuardOutcome::Allow.redirect(), None);
    assert_eq!(GuardOutcome::Loading.redirect(), None);
}
