//! In-process fakes for the transport, storage and navigation seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;

use crate::config::ClientConfig;
use crate::net::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::state::guard::Navigator;
use crate::state::session::Session;
use crate::util::storage::{KeyValueStore, MemoryStorage};

pub const TOKEN: &str = "token-abc";

/// Transport replaying scripted replies in order and recording every request.
///
/// A reply may be gated on a oneshot so tests can observe state while the
/// request is still in flight.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<HttpRequest>>,
}

struct Scripted {
    reply: Result<HttpResponse, TransportError>,
    gate: Option<oneshot::Receiver<()>>,
}

impl ScriptedTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: serde_json::Value) {
        self.push(Ok(HttpResponse { status, body: body.to_string() }), None);
    }

    pub fn reply_raw(&self, status: u16, body: &str) {
        self.push(Ok(HttpResponse { status, body: body.to_owned() }), None);
    }

    pub fn fail(&self, message: &str) {
        self.push(Err(TransportError(message.to_owned())), None);
    }

    /// Queue a reply that is only delivered once the returned sender fires.
    pub fn reply_gated(&self, status: u16, body: serde_json::Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Ok(HttpResponse { status, body: body.to_string() }), Some(rx));
        tx
    }

    fn push(&self, reply: Result<HttpResponse, TransportError>, gate: Option<oneshot::Receiver<()>>) {
        self.replies.borrow_mut().push_back(Scripted { reply, gate });
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        let Some(scripted) = self.replies.borrow_mut().pop_front() else {
            return Err(TransportError("no scripted reply".to_owned()));
        };
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.reply
    }
}

/// Navigator that remembers every redirect.
#[derive(Default)]
pub struct RecordingNavigator {
    redirects: RefCell<Vec<String>>,
    count: Cell<usize>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_owned());
        self.count.set(self.count.get() + 1);
    }
}

/// A session over fakes, with handles kept for assertions.
pub struct Harness {
    pub session: Session,
    pub transport: Rc<ScriptedTransport>,
    pub storage: Rc<MemoryStorage>,
    pub navigator: Rc<RecordingNavigator>,
}

impl Harness {
    /// Session with no stored credential.
    pub fn anonymous() -> Self {
        let transport = ScriptedTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        let navigator = Rc::new(RecordingNavigator::default());
        let session = Session::new(
            ClientConfig::default(),
            storage.clone(),
            transport.clone(),
            navigator.clone(),
        );
        Self { session, transport, storage, navigator }
    }

    /// Session with [`TOKEN`] already stored.
    pub fn signed_in() -> Self {
        let harness = Self::anonymous();
        harness.storage.set(&ClientConfig::default().credential_key, TOKEN);
        harness
    }

    pub fn stored_token(&self) -> Option<String> {
        self.storage.get(&ClientConfig::default().credential_key)
    }
}

pub fn message_json(id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "member_id": 1,
        "member_username": "ann",
        "text": text,
        "created_at": "2024-03-10T12:00:00Z"
    })
}

pub fn member_json() -> serde_json::Value {
    serde_json::json!({"id": 1, "username": "ann", "created_at": "2024-01-01T00:00:00Z"})
}
