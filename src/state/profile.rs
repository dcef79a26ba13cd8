//! Profile view state.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::guard::{Guarded, SessionGuard, SessionStatus};
use crate::net::gateway::ApiGateway;
use crate::net::types::Profile;

pub const PROFILE_FAILED_MESSAGE: &str = "Failed to load profile";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileState {
    pub profile: Option<Profile>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Fetches the signed-in member's profile for one mounted profile view.
pub struct ProfileLoader {
    gateway: Rc<ApiGateway>,
    guard: SessionGuard,
    state: RefCell<ProfileState>,
    disposed: Cell<bool>,
}

impl ProfileLoader {
    pub fn new(gateway: Rc<ApiGateway>, guard: SessionGuard) -> Self {
        Self {
            gateway,
            guard,
            state: RefCell::new(ProfileState::default()),
            disposed: Cell::new(false),
        }
    }

    pub fn snapshot(&self) -> ProfileState {
        self.state.borrow().clone()
    }

    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    /// Guard the view, then fetch the profile if a credential is present.
    pub async fn mount(&self) -> SessionStatus {
        let status = self.guard.evaluate();
        if status == SessionStatus::Authenticated {
            self.load().await;
        }
        status
    }

    pub async fn load(&self) {
        if self.disposed.get() {
            return;
        }
        {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            state.error = None;
        }

        let result = self.gateway.fetch_profile().await;
        if self.disposed.get() {
            leptos::logging::log!("profile load finished after unmount; result discarded");
            return;
        }

        let mut state = self.state.borrow_mut();
        state.loading = false;
        match self.guard.screen(result) {
            Guarded::Ok(profile) => state.profile = Some(profile),
            Guarded::Expired => state.error = Some(PROFILE_FAILED_MESSAGE.to_owned()),
            Guarded::Failed(e) => {
                leptos::logging::warn!("profile load failed: {e}");
                state.error = Some(PROFILE_FAILED_MESSAGE.to_owned());
            }
        }
    }
}
