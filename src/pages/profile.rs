//! Profile page with logout.

use std::rc::Rc;

use chrono::Local;
use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::types::NOT_SPECIFIED;
use crate::state::profile::ProfileState;
use crate::state::session::Session;
use crate::util::time_label;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = Session::browser(ClientConfig::from_build_env());
    let profile = RwSignal::new(ProfileState { loading: true, ..ProfileState::default() });
    let guard = StoredValue::new_local(session.guard().clone());
    let loader = StoredValue::new_local(Rc::new(session.profile()));

    #[cfg(feature = "hydrate")]
    {
        let loader = loader.get_value();
        leptos::task::spawn_local(async move {
            loader.mount().await;
            let _ = profile.try_set(loader.snapshot());
        });
    }
    on_cleanup(move || {
        let _ = loader.try_with_value(|l| l.dispose());
    });

    let on_logout = move |_| guard.with_value(|g| g.sign_out());

    let username = move || {
        profile
            .get()
            .profile
            .map_or_else(|| NOT_SPECIFIED.to_owned(), |p| p.display_username().to_owned())
    };
    let initial = move || profile.get().profile.unwrap_or_default().avatar_initial();
    let joined = move || {
        profile
            .get()
            .profile
            .and_then(|p| p.created_at)
            .map_or_else(|| NOT_SPECIFIED.to_owned(), |t| time_label::long_date(&t.with_timezone(&Local)))
    };

    view! {
        <div class="profile-container">
            {move || {
                let state = profile.get();
                if state.loading {
                    return view! {
                        <div class="profile-loading">
                            <div class="spinner"></div>
                            <p>"Loading profile..."</p>
                        </div>
                    }
                        .into_any();
                }
                if let Some(error) = state.error {
                    return view! {
                        <div class="profile-error">
                            <p>{error}</p>
                            <a class="btn-primary" href="/login">"Sign in again"</a>
                        </div>
                    }
                        .into_any();
                }
                view! {
                    <div class="profile-header">
                        <h1>"Profile"</h1>
                        <div class="profile-nav">
                            <a class="btn-secondary" href="/">"Chat"</a>
                            <button class="btn-logout" on:click=on_logout>"Log out"</button>
                        </div>
                    </div>
                    <div class="profile-card">
                        <div class="profile-avatar">
                            <div class="avatar-circle">{initial}</div>
                        </div>
                        <div class="profile-info">
                            <div class="info-item">
                                <label>"Username"</label>
                                <div class="info-value">{username}</div>
                            </div>
                            <div class="info-item">
                                <label>"Registered"</label>
                                <div class="info-value">{joined}</div>
                            </div>
                        </div>
                    </div>
                }
                    .into_any()
            }}
        </div>
    }
}
