//! Utility modules shared by state and pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` abstracts the browser's persistent key-value store and
//! `time_label` derives relative timestamps for message rendering.

pub mod storage;
pub mod time_label;
