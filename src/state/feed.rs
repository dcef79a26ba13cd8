//! Message feed for the chat view.
//!
//! ARCHITECTURE
//! ============
//! [`FeedSynchronizer`] owns the ordered message list for one mounted chat
//! view. `load` replaces the list wholesale; `send` appends the message the
//! service returns, never a locally fabricated one, so ids and timestamps
//! always match the authoritative record.
//!
//! CONCURRENCY
//! ===========
//! Everything runs on the browser's single thread, suspending only at
//! network calls. At most one send is in flight: a second call while
//! `pending` is set returns immediately and is not queued. Once the view
//! calls [`FeedSynchronizer::dispose`], completions that arrive late are
//! dropped instead of being written into the dead view.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use super::auth::ValidationError;
use super::guard::{Guarded, SessionGuard, SessionStatus};
use crate::net::gateway::{ApiError, ApiGateway};
use crate::net::types::Message;

pub const MAX_MESSAGE_CHARS: usize = 1000;
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load messages";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// Snapshot rendered by the chat view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedState {
    /// Oldest first, unique by id.
    pub messages: Vec<Message>,
    pub loading: bool,
    /// A send is in flight.
    pub pending: bool,
    /// Last user-visible failure, cleared when the next operation starts.
    pub error: Option<String>,
}

impl FeedState {
    /// Replace the list, keeping the first occurrence of any repeated id.
    fn replace(&mut self, messages: Vec<Message>) {
        let mut seen = HashSet::with_capacity(messages.len());
        self.messages = messages.into_iter().filter(|m| seen.insert(m.id)).collect();
    }

    /// Append at the tail unless the id is already present.
    fn append(&mut self, message: Message) -> bool {
        if self.messages.iter().any(|m| m.id == message.id) {
            return false;
        }
        self.messages.push(message);
        true
    }
}

/// Why `send` made no request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendSkip {
    /// Text was empty after trimming.
    Empty,
    /// Another send is still in flight.
    Pending,
}

/// What a call to [`FeedSynchronizer::send`] ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Confirmed by the service and appended.
    Sent(Message),
    Ignored(SendSkip),
    Invalid(ValidationError),
    Failed(ApiError),
    /// 401: the session was cleared and the view redirected.
    Expired,
    /// The view was disposed before the reply arrived.
    Discarded,
}

type Observer = Box<dyn Fn(&FeedState)>;

pub struct FeedSynchronizer {
    gateway: Rc<ApiGateway>,
    guard: SessionGuard,
    state: RefCell<FeedState>,
    disposed: Cell<bool>,
    observer: RefCell<Option<Observer>>,
}

impl FeedSynchronizer {
    pub fn new(gateway: Rc<ApiGateway>, guard: SessionGuard) -> Self {
        Self {
            gateway,
            guard,
            state: RefCell::new(FeedState::default()),
            disposed: Cell::new(false),
            observer: RefCell::new(None),
        }
    }

    /// Call `observer` with a fresh snapshot after every mutation.
    pub fn observe(&self, observer: impl Fn(&FeedState) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Mark the owning view as unmounted. Later completions are dropped.
    pub fn dispose(&self) {
        self.disposed.set(true);
        *self.observer.borrow_mut() = None;
    }

    /// Guard the view, then load only if a credential is present.
    pub async fn mount(&self) -> SessionStatus {
        let status = self.guard.evaluate();
        if status == SessionStatus::Authenticated {
            self.load().await;
        }
        status
    }

    /// Fetch the full list and replace the local one.
    ///
    /// On 401 the session expires and `messages` is left exactly as it was.
    pub async fn load(&self) {
        if self.is_disposed() {
            return;
        }
        self.mutate(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.gateway.fetch_messages().await;
        if self.discard_if_disposed("load") {
            return;
        }

        match self.guard.screen(result) {
            Guarded::Ok(messages) => self.mutate(|s| {
                s.replace(messages);
                s.loading = false;
            }),
            Guarded::Expired => self.mutate(|s| s.loading = false),
            Guarded::Failed(e) => {
                leptos::logging::warn!("feed load failed: {e}");
                self.mutate(|s| {
                    s.loading = false;
                    s.error = Some(LOAD_FAILED_MESSAGE.to_owned());
                });
            }
        }
    }

    /// Submit `text` (trimmed) and append the confirmed message.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored(SendSkip::Empty);
        }
        if self.is_disposed() {
            return SendOutcome::Discarded;
        }
        if self.state.borrow().pending {
            return SendOutcome::Ignored(SendSkip::Pending);
        }
        if text.chars().count() > MAX_MESSAGE_CHARS {
            return SendOutcome::Invalid(ValidationError::MessageTooLong);
        }

        self.mutate(|s| {
            s.pending = true;
            s.error = None;
        });

        let result = self.gateway.create_message(text).await;
        if self.discard_if_disposed("send") {
            return SendOutcome::Discarded;
        }

        match self.guard.screen(result) {
            Guarded::Ok(message) => {
                self.mutate(|s| {
                    if !s.append(message.clone()) {
                        leptos::logging::log!("message {} already in feed", message.id);
                    }
                    s.pending = false;
                });
                SendOutcome::Sent(message)
            }
            Guarded::Expired => {
                self.mutate(|s| s.pending = false);
                SendOutcome::Expired
            }
            Guarded::Failed(e) => {
                leptos::logging::warn!("message send failed: {e}");
                self.mutate(|s| {
                    s.pending = false;
                    s.error = Some(SEND_FAILED_MESSAGE.to_owned());
                });
                SendOutcome::Failed(e)
            }
        }
    }

    fn discard_if_disposed(&self, op: &str) -> bool {
        if self.is_disposed() {
            leptos::logging::log!("feed {op} finished after unmount; result discarded");
            return true;
        }
        false
    }

    fn mutate(&self, f: impl FnOnce(&mut FeedState)) {
        f(&mut self.state.borrow_mut());
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(&snapshot);
        }
    }
}
