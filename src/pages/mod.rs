//! Route-level page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `chat` and `profile` are protected and run the session guard on mount;
//! `login` and `register` are public.

pub mod chat;
pub mod login;
pub mod profile;
pub mod register;
