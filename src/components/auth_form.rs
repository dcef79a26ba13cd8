//! Username/password form shared by the login and register pages.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::session::Session;

/// Which flow the form submits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Register => "Sign up",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Login => "Sign in to your account",
            Self::Register => "Create your account",
        }
    }

    pub fn submit_label(self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::Login, false) => "Sign in",
            (Self::Login, true) => "Signing in...",
            (Self::Register, false) => "Sign up",
            (Self::Register, true) => "Signing up...",
        }
    }

    /// Prompt, link label and target for switching to the other form.
    pub fn switch_link(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Login => ("No account?", "Sign up", "/register"),
            Self::Register => ("Already have an account?", "Sign in", "/login"),
        }
    }
}

/// Form that authenticates, stores the token and navigates to the chat.
#[component]
pub fn AuthForm(mode: AuthMode) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let auth = RwSignal::new(AuthState::default());
    let session = StoredValue::new_local(Session::browser(ClientConfig::from_build_env()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.get_untracked().loading {
            return;
        }
        let name = username.get_untracked();
        let secret = password.get_untracked();
        auth.update(|a| {
            a.loading = true;
            a.error = None;
        });

        #[cfg(feature = "hydrate")]
        {
            let session = session.get_value();
            leptos::task::spawn_local(async move {
                let authenticator = session.authenticator();
                let result = match mode {
                    AuthMode::Login => authenticator.login(&name, &secret).await,
                    AuthMode::Register => authenticator.register(&name, &secret).await,
                };
                match result {
                    Ok(member) => {
                        auth.update(|a| {
                            a.member = Some(member);
                            a.loading = false;
                        });
                        session.guard().navigate("/");
                    }
                    Err(e) => auth.update(|a| {
                        a.loading = false;
                        a.error = Some(e.to_string());
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (session, name, secret);
        }
    };

    let (switch_prompt, switch_label, switch_href) = mode.switch_link();

    view! {
        <div class="auth-container">
            <div class="auth-card">
                <div class="auth-header">
                    <h1 class="auth-title">{mode.title()}</h1>
                    <p class="auth-subtitle">{mode.subtitle()}</p>
                </div>
                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || auth.get().error.is_some()>
                        <div class="auth-error">{move || auth.get().error.unwrap_or_default()}</div>
                    </Show>
                    <div class="form-group">
                        <label class="form-label" for="username">"Username"</label>
                        <input
                            id="username"
                            class="form-input"
                            type="text"
                            placeholder="Enter username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                            disabled=move || auth.get().loading
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label" for="password">"Password"</label>
                        <input
                            id="password"
                            class="form-input"
                            type="password"
                            placeholder="Enter password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || auth.get().loading
                        />
                    </div>
                    <button class="auth-button" type="submit" disabled=move || auth.get().loading>
                        {move || mode.submit_label(auth.get().loading)}
                    </button>
                    <div class="auth-footer">
                        <p class="auth-link-text">
                            {switch_prompt} " "
                            <a class="auth-link" href=switch_href>{switch_label}</a>
                        </p>
                    </div>
                </form>
            </div>
        </div>
    }
}
