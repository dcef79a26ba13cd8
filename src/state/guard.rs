//! Route guard for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected pages call [`SessionGuard::evaluate`] on mount, before issuing
//! any data request. The guard does not watch the store; it re-reads it on
//! each mount. A 401 from any later call is routed through
//! [`SessionGuard::screen`], which clears the credential and redirects the
//! same way no matter which operation saw it.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::rc::Rc;

use super::credential::CredentialStore;
use crate::net::gateway::ApiError;

/// Performs route changes on behalf of the core.
pub trait Navigator {
    fn redirect(&self, path: &str);
}

/// Navigates by assigning `window.location`. Inert outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(path);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}

/// Whether a protected view may render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
}

/// Result of an API call after the guard has screened it for expiry.
#[derive(Debug, PartialEq, Eq)]
pub enum Guarded<T> {
    Ok(T),
    /// The call returned 401; the credential is already cleared and the
    /// redirect issued.
    Expired,
    /// Any other failure, left to the calling view to surface.
    Failed(ApiError),
}

#[derive(Clone)]
pub struct SessionGuard {
    credentials: Rc<CredentialStore>,
    navigator: Rc<dyn Navigator>,
    login_path: String,
}

impl SessionGuard {
    pub fn new(credentials: Rc<CredentialStore>, navigator: Rc<dyn Navigator>, login_path: impl Into<String>) -> Self {
        Self { credentials, navigator, login_path: login_path.into() }
    }

    /// Decide on mount. Redirects to the login path when no credential is stored.
    pub fn evaluate(&self) -> SessionStatus {
        if self.credentials.is_present() {
            SessionStatus::Authenticated
        } else {
            self.navigator.redirect(&self.login_path);
            SessionStatus::Unauthenticated
        }
    }

    /// Transition to unauthenticated after the service rejected the credential.
    pub fn expire(&self) {
        leptos::logging::warn!("session credential rejected; redirecting to {}", self.login_path);
        self.credentials.clear();
        self.navigator.redirect(&self.login_path);
    }

    /// Explicit logout.
    pub fn sign_out(&self) {
        leptos::logging::log!("signing out");
        self.credentials.clear();
        self.navigator.redirect(&self.login_path);
    }

    /// Route a 401 to [`Self::expire`]; pass everything else through.
    pub fn screen<T>(&self, result: Result<T, ApiError>) -> Guarded<T> {
        match result {
            Ok(value) => Guarded::Ok(value),
            Err(ApiError::Unauthorized { .. }) => {
                self.expire();
                Guarded::Expired
            }
            Err(e) => Guarded::Failed(e),
        }
    }

    /// Send the user somewhere else, e.g. to the feed after logging in.
    pub fn navigate(&self, path: &str) {
        self.navigator.redirect(path);
    }
}
