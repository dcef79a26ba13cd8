//! Request layer shared by every API call.
//!
//! ARCHITECTURE
//! ============
//! Each call reads the credential fresh from the [`CredentialStore`] and, if
//! one is present, sends it as `Authorization: Bearer <token>`. A missing
//! credential still issues the call; the service decides what needs auth.
//!
//! ERROR HANDLING
//! ==============
//! Responses pass through a single interceptor: 2xx resolves with the parsed
//! body, 401 becomes [`ApiError::Unauthorized`] and everything else becomes
//! [`ApiError::Status`]. Callers never inspect raw status codes to detect an
//! expired session. Nothing here retries.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::rc::Rc;

use serde::de::DeserializeOwned;

use super::http::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::config::ClientConfig;
use crate::state::credential::CredentialStore;

/// Status reported for failures that never reached the server.
pub const TRANSPORT_FAILURE: u16 = 0;

/// Failure of a gateway call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401: the credential is missing, expired or rejected.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-2xx status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// No HTTP response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("response decode failed: {message}")]
    Decode { status: u16, message: String },
}

impl ApiError {
    /// HTTP status, or [`TRANSPORT_FAILURE`] when none was received.
    pub fn status(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } => 401,
            Self::Status { status, .. } | Self::Decode { status, .. } => *status,
            Self::Transport(_) => TRANSPORT_FAILURE,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Message suitable for showing next to the failed action.
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } | Self::Decode { message, .. } => {
                message
            }
            Self::Transport(message) => message,
        }
    }
}

/// Stateless request layer over an injected transport.
pub struct ApiGateway {
    transport: Rc<dyn HttpTransport>,
    credentials: Rc<CredentialStore>,
    config: ClientConfig,
}

impl ApiGateway {
    pub fn new(transport: Rc<dyn HttpTransport>, credentials: Rc<CredentialStore>, config: ClientConfig) -> Self {
        Self { transport, credentials, config }
    }

    /// Issue `method path` with an optional JSON body and return the JSON reply.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; 401 always maps to [`ApiError::Unauthorized`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ApiError> {
        self.exchange(method, path, body).await.map(|(_, value)| value)
    }

    /// [`Self::request`] followed by decoding into `R`.
    ///
    /// # Errors
    ///
    /// As [`Self::request`], plus [`ApiError::Decode`] when the body does not fit `R`.
    pub async fn request_json<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<R, ApiError> {
        let (status, value) = self.exchange(method, path, body).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode { status, message: e.to_string() })
    }

    async fn exchange(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(u16, serde_json::Value), ApiError> {
        let mut request = HttpRequest::new(method, self.config.endpoint(path));
        if let Some(token) = self.credentials.read() {
            request = request.with_header("Authorization", &bearer(&token));
        }
        if let Some(body) = body {
            request = request.with_json(body);
        }

        let response = self.transport.send(request).await.map_err(|e| {
            leptos::logging::warn!("{} {path} transport error: {e}", method.as_str());
            ApiError::Transport(e.0)
        })?;
        let status = response.status;
        intercept(method, path, response).map(|value| (status, value))
    }
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map a raw response onto the gateway's result shape.
fn intercept(method: Method, path: &str, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
    let status = response.status;
    if response.is_success() {
        if response.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        return serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Decode { status, message: e.to_string() });
    }

    let message = error_message(&response.body).unwrap_or_else(|| request_failed_message(status));
    leptos::logging::warn!("{} {path} failed: status={status}", method.as_str());
    if status == 401 {
        Err(ApiError::Unauthorized { message })
    } else {
        Err(ApiError::Status { status, message })
    }
}

pub(crate) fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Pull a human message out of an error body.
///
/// Checks a string `message`, then a string `error`, then the first string
/// inside an `error` object of field -> messages.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_owned());
    }
    match value.get("error")? {
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Object(fields) => fields.values().find_map(first_string),
        _ => None,
    }
}

fn first_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items.iter().find_map(first_string),
        _ => None,
    }
}
