//! Reusable UI components.

pub mod auth_form;
pub mod message_item;
