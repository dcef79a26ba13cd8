//! Wire DTOs for the chat service.
//!
//! DESIGN
//! ======
//! Field names mirror the service's JSON so serde needs no renames beyond
//! the token alias. Timestamps arrive as RFC 3339 strings and are held in
//! UTC; rendering converts to local time.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author shown when a message carries no username.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Shown in place of missing profile fields.
pub const NOT_SPECIFIED: &str = "Not specified";

/// A registered chat member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A single chat message. Immutable once the service has created it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    /// Message body, 1–1000 characters.
    pub text: String,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub member_username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Username to display, or [`ANONYMOUS_AUTHOR`] when the service sent none.
    pub fn author_label(&self) -> &str {
        self.member_username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
    }
}

/// Body for `POST /api/register/` and `POST /api/login/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body for `POST /api/messages/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewMessage {
    pub text: String,
}

/// Successful authentication response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    /// Opaque session token. Older service builds call it `access_token`.
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub member: Member,
}

/// The authenticated member's profile from `GET /api/profile/`.
///
/// Every field is optional; the profile view renders placeholders instead of
/// failing on a partial record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn display_username(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(NOT_SPECIFIED)
    }

    /// Upper-cased first character of the username, `U` when unknown.
    pub fn avatar_initial(&self) -> String {
        self.username
            .as_deref()
            .and_then(|name| name.chars().next())
            .map_or_else(|| "U".to_owned(), |c| c.to_uppercase().collect())
    }
}
