use super::*;
use futures::executor::block_on;

use crate::testing::{Harness, TOKEN, member_json};

#[test]
fn mount_without_credential_redirects_and_skips_fetch() {
    let h = Harness::anonymous();
    let loader = h.session.profile();
    assert_eq!(block_on(loader.mount()), SessionStatus::Unauthenticated);
    assert_eq!(h.transport.request_count(), 0);
    assert_eq!(h.navigator.redirects(), vec!["/login".to_owned()]);
}

#[test]
fn mount_loads_profile() {
    let h = Harness::signed_in();
    h.transport.reply(200, member_json());
    let loader = h.session.profile();
    block_on(loader.mount());

    let state = loader.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.profile.unwrap().display_username(), "ann");
}

#[test]
fn load_401_expires_session() {
    let h = Harness::signed_in();
    h.transport.reply(401, serde_json::json!({}));
    let loader = h.session.profile();
    block_on(loader.load());

    let state = loader.snapshot();
    assert!(!state.loading);
    assert!(state.profile.is_none());
    assert_eq!(state.error.as_deref(), Some(PROFILE_FAILED_MESSAGE));
    assert_eq!(h.stored_token(), None);
    assert_eq!(h.navigator.redirects(), vec!["/login".to_owned()]);
}

#[test]
fn load_failure_sets_error_and_keeps_session() {
    let h = Harness::signed_in();
    h.transport.reply(500, serde_json::json!({}));
    let loader = h.session.profile();
    block_on(loader.load());

    let state = loader.snapshot();
    assert_eq!(state.error.as_deref(), Some(PROFILE_FAILED_MESSAGE));
    assert!(!state.loading);
    assert_eq!(h.stored_token().as_deref(), Some(TOKEN));
}

#[test]
fn load_after_dispose_is_skipped() {
    let h = Harness::signed_in();
    let loader = h.session.profile();
    loader.dispose();
    block_on(loader.load());
    assert_eq!(h.transport.request_count(), 0);
    assert_eq!(loader.snapshot(), ProfileState::default());
}

#[test]
fn load_finishing_after_dispose_is_discarded() {
    let h = Harness::signed_in();
    let release = h.transport.reply_gated(200, member_json());
    let loader = h.session.profile();

    block_on(async {
        let loader = &loader;
        let unmount = async move {
            loader.dispose();
            release.send(()).unwrap();
        };
        futures::join!(loader.load(), unmount)
    });

    let state = loader.snapshot();
    assert!(state.profile.is_none());
    assert!(state.loading);
    assert_eq!(h.transport.request_count(), 1);
}

#[test]
fn late_401_after_dispose_keeps_credential() {
    let h = Harness::signed_in();
    let release = h.transport.reply_gated(401, serde_json::json!({}));
    let loader = h.session.profile();

    block_on(async {
        let loader = &loader;
        let unmount = async move {
            loader.dispose();
            release.send(()).unwrap();
        };
        futures::join!(loader.load(), unmount)
    });

    assert_eq!(h.stored_token().as_deref(), Some(TOKEN));
    assert!(h.navigator.redirects().is_empty());
    assert_eq!(loader.snapshot().error, None);
}
