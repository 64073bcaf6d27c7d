use async_trait::async_trait;
use courier_core::{InboxEntry, NewMessage, Page};

use crate::error::StorageError;

/// The backing store as seen by request handlers. Each method is one atomic statement.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persists a message and returns the store-assigned id.
    async fn insert(&self, message: &NewMessage) -> Result<i64, StorageError>;
    /// Messages addressed to `recipient`, oldest first, windowed by `page`.
    async fn inbox(&self, recipient: &str, page: Page) -> Result<Vec<InboxEntry>, StorageError>;
    /// Distinct recipients `sender` has messaged, in order of first contact.
    async fn recipients_of(&self, sender: &str) -> Result<Vec<String>, StorageError>;
}
