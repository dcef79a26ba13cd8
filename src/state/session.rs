//! Explicitly owned session context.
//!
//! ARCHITECTURE
//! ============
//! One [`Session`] bundles the credential store, gateway and guard built
//! over injected collaborators. Views build their per-mount state objects
//! (feed, profile, auth flows) from it, so tests can run each credential
//! state in isolation instead of sharing a global.

use std::rc::Rc;

use super::auth::Authenticator;
use super::credential::CredentialStore;
use super::feed::FeedSynchronizer;
use super::guard::{BrowserNavigator, Navigator, SessionGuard};
use super::profile::ProfileLoader;
use crate::config::ClientConfig;
use crate::net::gateway::ApiGateway;
use crate::net::http::{BrowserTransport, HttpTransport};
use crate::util::storage::{BrowserStorage, KeyValueStore};

#[derive(Clone)]
pub struct Session {
    credentials: Rc<CredentialStore>,
    gateway: Rc<ApiGateway>,
    guard: SessionGuard,
}

impl Session {
    pub fn new(
        config: ClientConfig,
        storage: Rc<dyn KeyValueStore>,
        transport: Rc<dyn HttpTransport>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let credentials = Rc::new(CredentialStore::new(storage, config.credential_key.clone()));
        let guard = SessionGuard::new(credentials.clone(), navigator, config.login_path.clone());
        let gateway = Rc::new(ApiGateway::new(transport, credentials.clone(), config));
        Self { credentials, gateway, guard }
    }

    /// Session over `localStorage`, `fetch` and `window.location`.
    pub fn browser(config: ClientConfig) -> Self {
        Self::new(config, Rc::new(BrowserStorage), Rc::new(BrowserTransport), Rc::new(BrowserNavigator))
    }

    pub fn credentials(&self) -> &Rc<CredentialStore> {
        &self.credentials
    }

    pub fn gateway(&self) -> &Rc<ApiGateway> {
        &self.gateway
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    pub fn feed(&self) -> FeedSynchronizer {
        FeedSynchronizer::new(self.gateway.clone(), self.guard.clone())
    }

    pub fn profile(&self) -> ProfileLoader {
        ProfileLoader::new(self.gateway.clone(), self.guard.clone())
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.gateway.clone(), self.credentials.clone())
    }
}
