//! Networking modules for the chat service REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the transport seam, `gateway` attaches the credential and maps
//! failures into [`gateway::ApiError`], `api` names the endpoints and
//! `types` defines the wire schema.

pub mod api;
pub mod gateway;
pub mod http;
pub mod types;
