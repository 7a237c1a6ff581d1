//! MessageRepository trait definition.
//!
//! Storage interface for the append-only message log. Implementations live
//! in parley-infra (e.g., `SqliteMessageRepository`). Uses native async fn
//! in traits (RPITIT, Rust 2024 edition).

use parley_types::error::RepositoryError;
use parley_types::message::{ChatMessage, NewMessage};

/// Repository trait for message persistence.
///
/// The log is append-only: no update or delete operations exist. Each
/// append assigns the next value of a strictly increasing sequence, which
/// defines insertion order for newest-first reads.
pub trait MessageRepository: Send + Sync {
    /// Append a message to the log, returning it with its assigned sequence.
    fn append(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// Messages visible to `caller`, newest-first, truncated to `limit`
    /// when given.
    ///
    /// A message is visible iff any of: it is a status message, `caller`
    /// authored it, it is addressed to `caller`, or it is a broadcast.
    fn visible_to(
        &self,
        caller: &str,
        limit: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}
