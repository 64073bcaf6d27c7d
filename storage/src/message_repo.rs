//! Message repository: persistence and queries for messages.
//!
//! Uses SqlitePoolManager. Every operation is a single
//! statement, so the store's per-statement atomicity is the only isolation needed.

use async_trait::async_trait;
use chrono::Utc;
use courier_core::{InboxEntry, NewMessage, Page};
use tracing::{debug, info};

use crate::error::StorageError;
#[cfg(test)]
use crate::models::MessageRecord;
use crate::repository::MessageStore;
use crate::sqlite_pool::{PoolSettings, SqlitePoolManager};

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::with_settings(database_url, PoolSettings::default()).await
    }

    pub async fn with_settings(
        database_url: &str,
        settings: PoolSettings,
    ) -> Result<Self, sqlx::Error> {
        let pool_manager = SqlitePoolManager::with_settings(database_url, settings).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sender TEXT NOT NULL,
                recipient TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_recipient ON messages(recipient);
            CREATE INDEX IF NOT EXISTS idx_messages_sender ON messages(sender);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Inserts a message and returns its AUTOINCREMENT id.
    pub async fn save(&self, message: &NewMessage) -> Result<i64, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            r#"
            INSERT INTO messages (sender, recipient, message, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(message.sender())
        .bind(message.recipient())
        .bind(message.body())
        .bind(Utc::now())
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(
            message_id = id,
            sender = %message.sender(),
            recipient = %message.recipient(),
            "Saved message"
        );
        Ok(id)
    }

    /// Messages addressed to `recipient` in insertion order.
    pub async fn get_inbox(
        &self,
        recipient: &str,
        page: Page,
    ) -> Result<Vec<InboxEntry>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let rows: Vec<(String, String)> = if page.is_all() {
            sqlx::query_as("SELECT sender, message FROM messages WHERE recipient = ? ORDER BY id")
                .bind(recipient)
                .fetch_all(pool)
                .await?
        } else {
            // SQLite reads a negative LIMIT as "no limit".
            let limit = page.limit.map(i64::from).unwrap_or(-1);
            sqlx::query_as(
                "SELECT sender, message FROM messages WHERE recipient = ? ORDER BY id LIMIT ? OFFSET ?",
            )
            .bind(recipient)
            .bind(limit)
            .bind(i64::from(page.offset))
            .fetch_all(pool)
            .await?
        };

        debug!(recipient = %recipient, count = rows.len(), "Retrieved inbox");

        Ok(rows
            .into_iter()
            .map(|(sender, body)| InboxEntry { sender, body })
            .collect())
    }

    /// Distinct recipients of `sender`, ordered by the first message sent to each.
    pub async fn get_recipients(&self, sender: &str) -> Result<Vec<String>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT recipient FROM messages WHERE sender = ? GROUP BY recipient ORDER BY MIN(id)",
        )
        .bind(sender)
        .fetch_all(pool)
        .await?;

        debug!(sender = %sender, count = rows.len(), "Retrieved recipients");

        Ok(rows.into_iter().map(|(recipient,)| recipient).collect())
    }

    /// Full row lookup, used to check what `save` actually wrote.
    #[cfg(test)]
    pub(crate) async fn get_message_by_id(
        &self,
        message_id: i64,
    ) -> Result<Option<MessageRecord>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let message = sqlx::query_as::<_, MessageRecord>(
            "SELECT id, sender, recipient, message, created_at FROM messages WHERE id = ?",
        )
        .bind(message_id)
        .fetch_optional(pool)
        .await?;

        Ok(message)
    }

    #[cfg(test)]
    pub(crate) async fn count(&self) -> Result<i64, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(pool)
            .await?;

        Ok(total.0)
    }

    pub async fn close(&self) {
        self.pool_manager.close().await;
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn insert(&self, message: &NewMessage) -> Result<i64, StorageError> {
        Ok(self.save(message).await?)
    }

    async fn inbox(&self, recipient: &str, page: Page) -> Result<Vec<InboxEntry>, StorageError> {
        Ok(self.get_inbox(recipient, page).await?)
    }

    async fn recipients_of(&self, sender: &str) -> Result<Vec<String>, StorageError> {
        Ok(self.get_recipients(sender).await?)
    }
}
