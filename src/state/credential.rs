//! Lifecycle of the single session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is written on login/register, read by every API call and by the
//! route guard, and cleared on logout or a 401. No expiry is tracked here;
//! the service decides validity when the token is presented.

#[cfg(test)]
#[path = "credential_test.rs"]
mod credential_test;

use std::rc::Rc;

use crate::util::storage::KeyValueStore;

/// Persists one opaque token under a fixed key.
pub struct CredentialStore {
    storage: Rc<dyn KeyValueStore>,
    key: String,
}

impl CredentialStore {
    pub fn new(storage: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    /// Replace any stored token. A blank token clears instead.
    pub fn save(&self, token: &str) {
        if token.trim().is_empty() {
            self.clear();
            return;
        }
        self.storage.set(&self.key, token);
    }

    /// Current token, if any.
    pub fn read(&self) -> Option<String> {
        self.storage.get(&self.key).filter(|token| !token.trim().is_empty())
    }

    pub fn is_present(&self) -> bool {
        self.read().is_some()
    }

    /// Remove the token. Safe to call when nothing is stored.
    pub fn clear(&self) {
        self.storage.remove(&self.key);
    }
}
