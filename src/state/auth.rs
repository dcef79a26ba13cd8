//! Login and registration flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the login and register pages. Field constraints are checked here
//! before anything reaches the gateway; the service stays authoritative and
//! its message is shown when it rejects a submission.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use super::credential::CredentialStore;
use crate::net::gateway::{ApiError, ApiGateway, request_failed_message};
use crate::net::types::{AuthResponse, Credentials, Member};

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 6;

pub const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed";

/// Local, pre-submission constraint violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Fill in all fields")]
    MissingFields,
    #[error("Username must be between 3 and 50 characters")]
    UsernameLength,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Message must be at most 1000 characters")]
    MessageTooLong,
}

/// Why a login or registration did not produce a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("{0}")]
    Invalid(ValidationError),
    /// The service refused; `message` is ready to show on the form.
    #[error("{message}")]
    Rejected { message: String, source: ApiError },
}

/// Form state for the login/register pages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub member: Option<Member>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Both login fields must be non-empty.
///
/// # Errors
///
/// [`ValidationError::MissingFields`] when either is empty.
pub fn validate_login(username: &str, password: &str) -> Result<Credentials, ValidationError> {
    if username.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(Credentials { username: username.to_owned(), password: password.to_owned() })
}

/// Username 3–50 characters, password at least 6.
///
/// # Errors
///
/// The first constraint that fails, username before password.
pub fn validate_registration(username: &str, password: &str) -> Result<Credentials, ValidationError> {
    let username_chars = username.chars().count();
    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_chars) {
        return Err(ValidationError::UsernameLength);
    }
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(Credentials { username: username.to_owned(), password: password.to_owned() })
}

pub struct Authenticator {
    gateway: Rc<ApiGateway>,
    credentials: Rc<CredentialStore>,
}

impl Authenticator {
    pub fn new(gateway: Rc<ApiGateway>, credentials: Rc<CredentialStore>) -> Self {
        Self { gateway, credentials }
    }

    /// Log in and store the returned token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// [`AuthFailure::Invalid`] before any request, or
    /// [`AuthFailure::Rejected`] when the service refuses.
    pub async fn login(&self, username: &str, password: &str) -> Result<Member, AuthFailure> {
        let credentials = validate_login(username, password).map_err(AuthFailure::Invalid)?;
        let result = self.gateway.login(&credentials).await;
        self.finish(result, LOGIN_FAILED_MESSAGE)
    }

    /// Register a new member and store the returned token.
    ///
    /// # Errors
    ///
    /// As [`Self::login`].
    pub async fn register(&self, username: &str, password: &str) -> Result<Member, AuthFailure> {
        let credentials = validate_registration(username, password).map_err(AuthFailure::Invalid)?;
        let result = self.gateway.register(&credentials).await;
        self.finish(result, REGISTER_FAILED_MESSAGE)
    }

    // A 401 here means bad credentials, not an expired session, so it is
    // reported on the form rather than routed through the guard.
    fn finish(&self, result: Result<AuthResponse, ApiError>, fallback: &str) -> Result<Member, AuthFailure> {
        match result {
            Ok(resp) => {
                self.credentials.save(&resp.token);
                leptos::logging::log!("authenticated as {}", resp.member.username);
                Ok(resp.member)
            }
            Err(source) => {
                leptos::logging::warn!("authentication failed: {source}");
                let message = server_message(&source).unwrap_or_else(|| fallback.to_owned());
                Err(AuthFailure::Rejected { message, source })
            }
        }
    }
}

/// The service's own explanation, if it sent one.
fn server_message(error: &ApiError) -> Option<String> {
    let message = match error {
        ApiError::Unauthorized { message } | ApiError::Status { message, .. } => message,
        ApiError::Transport(_) | ApiError::Decode { .. } => return None,
    };
    (*message != request_failed_message(error.status())).then(|| message.clone())
}
