use super::*;
use crate::error::ApiError;

#[test]
fn validate_login_input_trims_username_only() {
    assert_eq!(
        validate_login_input("  admin ", " secret "),
        Ok(("admin".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert!(validate_login_input("", "pw").is_err());
    assert!(validate_login_input("   ", "pw").is_err());
    assert!(validate_login_input("admin", "").is_err());
}

#[test]
fn login_error_message_distinguishes_bad_credentials() {
    assert_eq!(login_error_message(&SessionError::AuthFailure), "Invalid username or password.");
    let network = login_error_message(&SessionError::TransientNetwork(ApiError::Status { status: 500 }));
    assert!(network.starts_with("Login failed:"));
    assert!(network.contains("500"));
}

#[test]
fn login_error_message_for_cancelled_sign_in() {
    assert_eq!(login_error_message(&SessionError::Superseded), "Signed out while logging in, please try again.");
}
