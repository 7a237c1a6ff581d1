use thiserror::Error;

/// Errors from repository operations (used by trait definitions in parley-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors related to presence operations.
#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("invalid participant name: {0}")]
    InvalidName(String),

    #[error("participant '{0}' already exists")]
    NameTaken(String),

    #[error("participant not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors related to message operations.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("invalid message: {0}")]
    Invalid(String),

    #[error("sender '{0}' is not in the room")]
    UnknownSender(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for PresenceError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(name) => PresenceError::NameTaken(name),
            RepositoryError::NotFound => PresenceError::NotFound,
            other => PresenceError::Storage(other.to_string()),
        }
    }
}

impl From<RepositoryError> for MessageError {
    fn from(e: RepositoryError) -> Self {
        MessageError::Storage(e.to_string())
    }
}
