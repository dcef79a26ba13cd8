//! A single row in the chat feed.

use chrono::{DateTime, Local, Utc};
use leptos::prelude::*;

use crate::net::types::Message;
use crate::util::time_label;

/// Author, relative time and text for one message. `now` is sampled by the
/// caller on each render so labels advance.
#[component]
pub fn MessageItem(message: Message, now: DateTime<Utc>) -> impl IntoView {
    let author = message.author_label().to_owned();
    let time = time_label::label(&message.created_at.with_timezone(&Local), now);

    view! {
        <div class="message-item">
            <div class="message-header">
                <span class="message-author">{author}</span>
                <span class="message-time">{time}</span>
            </div>
            <div class="message-text">{message.text}</div>
        </div>
    }
}
