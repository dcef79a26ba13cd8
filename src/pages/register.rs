//! Registration page. Field limits are enforced by the auth flow before submit.

use leptos::prelude::*;

use crate::components::auth_form::{AuthForm, AuthMode};

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! { <AuthForm mode=AuthMode::Register/> }
}
