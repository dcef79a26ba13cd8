//! Chat page: the shared message feed and the composer.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the protected landing route. On mount it runs the session guard
//! and, if a credential is present, loads the feed once. There is no push
//! channel; new messages from others appear on the next mount.

use std::rc::Rc;

use chrono::Utc;
use leptos::prelude::*;

use crate::components::message_item::MessageItem;
use crate::config::ClientConfig;
use crate::state::feed::{FeedState, MAX_MESSAGE_CHARS};
use crate::state::session::Session;

#[component]
pub fn ChatPage() -> impl IntoView {
    let session = Session::browser(ClientConfig::from_build_env());
    let feed = RwSignal::new(FeedState { loading: true, ..FeedState::default() });
    let input = RwSignal::new(String::new());

    let sync = Rc::new(session.feed());
    sync.observe(move |state| {
        // The signal may already be gone if a reply lands during teardown.
        let _ = feed.try_set(state.clone());
    });
    let sync = StoredValue::new_local(sync);

    #[cfg(feature = "hydrate")]
    {
        let sync = sync.get_value();
        leptos::task::spawn_local(async move {
            sync.mount().await;
        });
    }
    on_cleanup(move || {
        let _ = sync.try_with_value(|s| s.dispose());
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked();

        #[cfg(feature = "hydrate")]
        {
            let sync = sync.get_value();
            leptos::task::spawn_local(async move {
                if let crate::state::feed::SendOutcome::Sent(_) = sync.send(&text).await {
                    input.set(String::new());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = text;
        }
    };

    let can_send = move || !input.get().trim().is_empty() && !feed.get().pending;

    view! {
        <div class="chat-container">
            <div class="chat-header">
                <h1>"Group chat"</h1>
                <a class="profile-btn" href="/profile">"Profile"</a>
            </div>

            <div class="messages-container">
                {move || {
                    let state = feed.get();
                    if state.loading {
                        return view! { <div class="loading">"Loading messages..."</div> }.into_any();
                    }
                    if state.messages.is_empty() {
                        return view! {
                            <div class="no-messages">"No messages yet. Write the first one!"</div>
                        }
                            .into_any();
                    }
                    let now = Utc::now();
                    state
                        .messages
                        .into_iter()
                        .map(|message| view! { <MessageItem message=message now=now/> })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>

            <Show when=move || feed.get().error.is_some()>
                <p class="chat-error">{move || feed.get().error.unwrap_or_default()}</p>
            </Show>

            <form class="message-form" on:submit=on_submit>
                <input
                    class="message-input"
                    type="text"
                    placeholder="Type a message..."
                    maxlength=MAX_MESSAGE_CHARS.to_string()
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    disabled=move || feed.get().pending
                />
                <button class="send-btn" type="submit" disabled=move || !can_send()>
                    {move || if feed.get().pending { "Sending..." } else { "Send" }}
                </button>
            </form>
        </div>
    }
}
