//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern so each view depends on a small focused model:
//! `credential` owns the stored token, `guard` decides whether a protected
//! view may render, `feed` and `profile` own per-view data, `auth` runs the
//! login/register flows and `session` wires them together.

pub mod auth;
pub mod credential;
pub mod feed;
pub mod guard;
pub mod profile;
pub mod session;
