use super::*;
use futures::executor::block_on;

use crate::net::api::{LOGIN_PATH, MESSAGES_PATH, REGISTER_PATH};
use crate::testing::{Harness, member_json};

// =============================================================
// validate_login
// =============================================================

#[test]
fn validate_login_requires_both_fields() {
    assert_eq!(validate_login("", "secret1"), Err(ValidationError::MissingFields));
    assert_eq!(validate_login("ann", ""), Err(ValidationError::MissingFields));
    assert!(validate_login("ann", "x").is_ok());
}

// =============================================================
// validate_registration
// =============================================================

#[test]
fn validate_registration_username_bounds() {
    assert_eq!(validate_registration("ab", "secret1"), Err(ValidationError::UsernameLength));
    assert!(validate_registration("abc", "secret1").is_ok());
    assert!(validate_registration(&"a".repeat(50), "secret1").is_ok());
    assert_eq!(
        validate_registration(&"a".repeat(51), "secret1"),
        Err(ValidationError::UsernameLength)
    );
}

#[test]
fn validate_registration_counts_characters() {
    assert!(validate_registration("аня", "secret1").is_ok());
}

#[test]
fn validate_registration_password_minimum() {
    assert_eq!(validate_registration("ann", "12345"), Err(ValidationError::PasswordTooShort));
    assert!(validate_registration("ann", "123456").is_ok());
}

#[test]
fn validate_registration_reports_username_first() {
    assert_eq!(validate_registration("a", "1"), Err(ValidationError::UsernameLength));
}

#[test]
fn validation_messages_are_user_facing() {
    assert_eq!(ValidationError::MissingFields.to_string(), "Fill in all fields");
    assert_eq!(
        ValidationError::PasswordTooShort.to_string(),
        "Password must be at least 6 characters"
    );
}

// =============================================================
// Authenticator
// =============================================================

#[test]
fn login_then_messages_request_carries_bearer_token() {
    let h = Harness::anonymous();
    h.transport.reply(200, serde_json::json!({"token": "tok-ann", "member": member_json()}));
    h.transport.reply(200, serde_json::json!([]));

    let member = block_on(h.session.authenticator().login("ann", "secret1")).unwrap();
    assert_eq!(member.username, "ann");
    assert_eq!(h.session.credentials().read().as_deref(), Some("tok-ann"));

    block_on(h.session.feed().load());
    let sent = h.transport.requests();
    assert_eq!(sent[0].url, LOGIN_PATH);
    assert_eq!(sent[0].header("Authorization"), None);
    assert_eq!(sent[1].url, MESSAGES_PATH);
    assert_eq!(sent[1].header("Authorization"), Some("Bearer tok-ann"));
}

#[test]
fn login_overwrites_existing_credential() {
    let h = Harness::signed_in();
    h.transport.reply(200, serde_json::json!({"access_token": "new", "member": member_json()}));
    block_on(h.session.authenticator().login("ann", "secret1")).unwrap();
    assert_eq!(h.stored_token().as_deref(), Some("new"));
}

#[test]
fn login_validation_failure_makes_no_request() {
    let h = Harness::anonymous();
    let err = block_on(h.session.authenticator().login("ann", "")).unwrap_err();
    assert_eq!(err, AuthFailure::Invalid(ValidationError::MissingFields));
    assert_eq!(h.transport.request_count(), 0);
}

#[test]
fn login_rejection_shows_server_message_without_redirect() {
    let h = Harness::anonymous();
    h.transport.reply(401, serde_json::json!({"error": "Invalid credentials"}));
    let err = block_on(h.session.authenticator().login("ann", "wrongpw")).unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(matches!(err, AuthFailure::Rejected { ref source, .. } if source.is_unauthorized()));
    assert_eq!(h.navigator.count(), 0);
    assert_eq!(h.stored_token(), None);
}

#[test]
fn login_rejection_without_body_uses_default_message() {
    let h = Harness::anonymous();
    h.transport.reply_raw(401, "");
    let err = block_on(h.session.authenticator().login("ann", "wrongpw")).unwrap_err();
    assert_eq!(err.to_string(), LOGIN_FAILED_MESSAGE);
}

#[test]
fn register_saves_token_and_returns_member() {
    let h = Harness::anonymous();
    h.transport.reply(201, serde_json::json!({"access_token": "reg", "token_type": "Bearer", "member": member_json()}));
    let member = block_on(h.session.authenticator().register("ann", "secret1")).unwrap();

    assert_eq!(member.id, 1);
    assert_eq!(h.stored_token().as_deref(), Some("reg"));
    assert_eq!(h.transport.requests()[0].url, REGISTER_PATH);
}

#[test]
fn register_duplicate_username_surfaces_field_error() {
    let h = Harness::anonymous();
    h.transport.reply(
        400,
        serde_json::json!({"error": {"username": ["A member with this username already exists."]}}),
    );
    let err = block_on(h.session.authenticator().register("ann", "secret1")).unwrap_err();
    assert_eq!(err.to_string(), "A member with this username already exists.");
}

#[test]
fn register_transport_failure_uses_default_message() {
    let h = Harness::anonymous();
    h.transport.fail("offline");
    let err = block_on(h.session.authenticator().register("ann", "secret1")).unwrap_err();
    assert_eq!(err.to_string(), REGISTER_FAILED_MESSAGE);
}

#[test]
fn register_short_password_makes_no_request() {
    let h = Harness::anonymous();
    let err = block_on(h.session.authenticator().register("ann", "123")).unwrap_err();
    assert_eq!(err.to_string(), "Password must be at least 6 characters");
    assert_eq!(h.transport.request_count(), 0);
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_is_idle() {
    let state = AuthState::default();
    assert!(state.member.is_none());
    assert!(!state.loading);
    assert!(state.error.is_none());
}
