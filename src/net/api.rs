//! Typed helpers for the chat service endpoints.
//!
//! Every helper goes through [`ApiGateway::request_json`], so the bearer
//! header and the 401 mapping apply uniformly.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::gateway::{ApiError, ApiGateway};
use super::http::Method;
use super::types::{AuthResponse, Credentials, Message, NewMessage, Profile};

pub const REGISTER_PATH: &str = "/api/register/";
pub const LOGIN_PATH: &str = "/api/login/";
pub const PROFILE_PATH: &str = "/api/profile/";
pub const MESSAGES_PATH: &str = "/api/messages/";

fn to_body<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Transport(e.to_string()))
}

impl ApiGateway {
    /// `POST /api/register/`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`] for any failed exchange.
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.request_json(Method::Post, REGISTER_PATH, Some(to_body(credentials)?)).await
    }

    /// `POST /api/login/`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`]; bad credentials arrive as `Unauthorized`.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.request_json(Method::Post, LOGIN_PATH, Some(to_body(credentials)?)).await
    }

    /// `GET /api/profile/`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`] for any failed exchange.
    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.request_json(Method::Get, PROFILE_PATH, None).await
    }

    /// `GET /api/messages/`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`] for any failed exchange.
    pub async fn fetch_messages(&self) -> Result<Vec<Message>, ApiError> {
        self.request_json(Method::Get, MESSAGES_PATH, None).await
    }

    /// `POST /api/messages/`. Returns the message as the service stored it.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`] for any failed exchange.
    pub async fn create_message(&self, text: &str) -> Result<Message, ApiError> {
        let body = to_body(&NewMessage { text: text.to_owned() })?;
        self.request_json(Method::Post, MESSAGES_PATH, Some(body)).await
    }
}
