//! Application state wiring the services together.
//!
//! Services are generic over repository traits; AppState pins them to the
//! concrete SQLite implementations from parley-infra.

use std::sync::Arc;

use parley_core::message::MessageService;
use parley_core::presence::PresenceService;
use parley_infra::sqlite::message::SqliteMessageRepository;
use parley_infra::sqlite::participant::SqliteParticipantRepository;
use parley_infra::sqlite::pool::DatabasePool;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcretePresenceService =
    PresenceService<SqliteParticipantRepository, SqliteMessageRepository>;

pub type ConcreteMessageService =
    MessageService<SqliteParticipantRepository, SqliteMessageRepository>;

/// Shared application state holding the services.
///
/// Cloned per request by axum; the sweeper holds its own handle to the
/// presence service.
#[derive(Clone)]
pub struct AppState {
    pub presence: Arc<ConcretePresenceService>,
    pub messages: Arc<ConcreteMessageService>,
}

impl AppState {
    /// Initialize the application state: connect to the database, wire services.
    pub async fn init(database_url: &str) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(database_url).await?;

        let presence = Arc::new(PresenceService::new(
            SqliteParticipantRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
        ));
        let messages = Arc::new(MessageService::new(
            SqliteParticipantRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
        ));

        Ok(Self { presence, messages })
    }
}
