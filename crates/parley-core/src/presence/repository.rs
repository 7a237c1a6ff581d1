//! ParticipantRepository trait definition.
//!
//! Storage interface for the presence side of the room: one row per
//! participant, keyed by name. Implementations live in parley-infra
//! (e.g., `SqliteParticipantRepository`). Uses native async fn in traits
//! (RPITIT, Rust 2024 edition).

use chrono::{DateTime, Utc};
use parley_types::error::RepositoryError;
use parley_types::participant::Participant;

/// Repository trait for participant persistence.
pub trait ParticipantRepository: Send + Sync {
    /// Insert a new participant.
    ///
    /// Returns `Conflict` if the name is already taken -- the store's
    /// uniqueness constraint is the final arbiter under concurrent
    /// registrations of the same name.
    fn insert(
        &self,
        participant: &Participant,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Look up a participant by exact (case-sensitive) name.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Participant>, RepositoryError>> + Send;

    /// List every current participant, stale-but-unreaped included.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Participant>, RepositoryError>> + Send;

    /// Set `last_status` to `at`. Returns `false` if no such participant.
    fn touch(
        &self,
        name: &str,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Participants whose `last_status` is strictly before `cutoff`.
    fn find_stale(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<Participant>, RepositoryError>> + Send;

    /// Delete the named participants as one batch, returning how many rows
    /// went away. Names that no longer exist contribute nothing, which is
    /// what makes the reap safe to re-run on an overlapping timer.
    fn remove_batch(
        &self,
        names: &[String],
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
