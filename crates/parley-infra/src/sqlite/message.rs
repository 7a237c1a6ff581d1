//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `parley-core` using sqlx with split
//! read/write pools. The `seq` column (AUTOINCREMENT rowid) supplies the
//! insertion-order sequence; visibility filtering and newest-first
//! truncation are pushed down into SQL.

use sqlx::Row;

use parley_core::message::MessageRepository;
use parley_types::error::RepositoryError;
use parley_types::message::{ChatMessage, MessageKind, NewMessage, BROADCAST};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct MessageRow {
    seq: i64,
    sender: String,
    recipient: String,
    body: String,
    kind: String,
    time: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            seq: row.try_get("seq")?,
            sender: row.try_get("sender")?,
            recipient: row.try_get("recipient")?,
            body: row.try_get("body")?,
            kind: row.try_get("kind")?,
            time: row.try_get("time")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let kind: MessageKind = self
            .kind
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatMessage {
            seq: self.seq,
            from: self.sender,
            to: self.recipient,
            text: self.body,
            kind,
            time: self.time,
        })
    }
}

impl MessageRepository for SqliteMessageRepository {
    async fn append(&self, message: &NewMessage) -> Result<ChatMessage, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO messages (sender, recipient, body, kind, time) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&message.from)
        .bind(&message.to)
        .bind(&message.text)
        .bind(message.kind.to_string())
        .bind(&message.time)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(ChatMessage {
            seq: result.last_insert_rowid(),
            from: message.from.clone(),
            to: message.to.clone(),
            text: message.text.clone(),
            kind: message.kind,
            time: message.time.clone(),
        })
    }

    async fn visible_to(
        &self,
        caller: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut sql = String::from(
            "SELECT * FROM messages
             WHERE kind = 'status' OR sender = ? OR recipient = ? OR recipient = ?
             ORDER BY seq DESC",
        );

        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let rows = sqlx::query(&sql)
            .bind(caller)
            .bind(caller)
            .bind(BROADCAST)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let message_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(message_row.into_message()?);
        }

        Ok(messages)
    }
}
