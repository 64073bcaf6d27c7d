//! Storage crate: message persistence and the store abstraction used by the HTTP layer.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`repository`] – MessageStore trait
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager, PoolSettings

mod error;
mod message_repo;
#[cfg(test)]
mod models;
mod repository;
mod sqlite_pool;

#[cfg(test)]
mod message_repo_test;

pub use error::StorageError;
pub use message_repo::MessageRepository;
pub use repository::MessageStore;
pub use sqlite_pool::{PoolSettings, SqlitePoolManager};
