//! # courier-core
//!
//! Core types for the message store service: validated submissions ([`NewMessage`]),
//! inbox entries, pagination windows, validation errors and tracing initialization.
//! Transport-agnostic; used by `storage` and `courier-server`.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{Result, ValidationError};
pub use logger::init_tracing;
pub use types::{required_identifier, InboxEntry, NewMessage, Page, MAX_PAGE_LIMIT};
