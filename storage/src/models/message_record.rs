//! Full `messages` row, read back by the repository's unit tests.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: i64,
    pub sender: String,
    pub recipient: String,
    /// Message body; the column keeps the wire name.
    pub message: String,
    pub created_at: DateTime<Utc>,
}
