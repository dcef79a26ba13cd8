//! Client configuration resolved at build time.
//!
//! A WASM bundle has no process environment, so values are baked in through
//! `option_env!` when the crate is compiled and fall back to same-origin
//! defaults otherwise.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_CREDENTIAL_KEY: &str = "authToken";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix prepended to every API path (`""` means same origin).
    pub api_base_url: String,
    /// Key under which the session token lives in the persistent store.
    pub credential_key: String,
    /// Route the guard redirects to when no valid credential is present.
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

impl ClientConfig {
    /// Build config from compile-time variables.
    ///
    /// Optional:
    /// - `CHAT_API_BASE_URL`: defaults to same origin
    /// - `CHAT_CREDENTIAL_KEY`: defaults to `authToken`
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("CHAT_API_BASE_URL"), option_env!("CHAT_CREDENTIAL_KEY"))
    }

    /// Build config from raw optional values, applying defaults for blanks.
    pub fn from_values(api_base_url: Option<&str>, credential_key: Option<&str>) -> Self {
        let api_base_url = non_blank(api_base_url)
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let credential_key = non_blank(credential_key)
            .unwrap_or(DEFAULT_CREDENTIAL_KEY)
            .to_owned();
        Self { api_base_url, credential_key, login_path: DEFAULT_LOGIN_PATH.to_owned() }
    }

    /// Absolute URL for an API path such as `/api/messages/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
