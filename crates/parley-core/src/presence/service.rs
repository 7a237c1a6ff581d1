//! Presence service owning the participant lifecycle.
//!
//! Registration and reap both write through two repositories: the
//! participant row plus a status announcement in the message log. The two
//! writes are not transactional -- a failed announcement after a successful
//! participant write is surfaced to the caller and left as-is, never rolled
//! back or retried.

use chrono::{Duration, Utc};
use tracing::info;

use parley_types::error::PresenceError;
use parley_types::message::NewMessage;
use parley_types::participant::Participant;

use crate::message::repository::MessageRepository;
use crate::presence::repository::ParticipantRepository;

/// Text of the join announcement.
const ENTERED_THE_ROOM: &str = "entered the room";
/// Text of the leave announcement emitted by the reap.
const LEFT_THE_ROOM: &str = "left the room";

/// Orchestrates participant registration, heartbeat, and eviction.
///
/// Generic over `ParticipantRepository` and `MessageRepository` to maintain
/// clean architecture (parley-core never depends on parley-infra).
pub struct PresenceService<P: ParticipantRepository, M: MessageRepository> {
    participants: P,
    messages: M,
}

impl<P: ParticipantRepository, M: MessageRepository> PresenceService<P, M> {
    /// Create a new presence service with the given repositories.
    pub fn new(participants: P, messages: M) -> Self {
        Self {
            participants,
            messages,
        }
    }

    /// Register a new participant and announce the join.
    ///
    /// The existence pre-check keeps the common duplicate off the writer
    /// pool; the store's uniqueness constraint settles concurrent
    /// registrations of the same name, so both paths report `NameTaken`.
    pub async fn register(&self, name: &str) -> Result<Participant, PresenceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresenceError::InvalidName(
                "name cannot be empty".to_string(),
            ));
        }

        if self.participants.find_by_name(name).await?.is_some() {
            return Err(PresenceError::NameTaken(name.to_string()));
        }

        let participant = Participant::new(name);
        self.participants.insert(&participant).await?;

        // Join announcement. If this append fails the participant row
        // stays: an at-least-once side-effect pair, surfaced not retried.
        self.messages
            .append(&NewMessage::status(
                name,
                ENTERED_THE_ROOM,
                participant.last_status,
            ))
            .await
            .map_err(|e| PresenceError::Storage(e.to_string()))?;

        info!(name, "participant registered");
        Ok(participant)
    }

    /// Refresh a participant's liveness timestamp.
    pub async fn heartbeat(&self, name: &str) -> Result<(), PresenceError> {
        let touched = self
            .participants
            .touch(name, Utc::now())
            .await
            .map_err(|e| PresenceError::Storage(e.to_string()))?;

        if !touched {
            return Err(PresenceError::NotFound);
        }
        Ok(())
    }

    /// Every current participant. No staleness filtering: a silent
    /// participant stays listed until the sweep removes it.
    pub async fn list_active(&self) -> Result<Vec<Participant>, PresenceError> {
        Ok(self.participants.list().await?)
    }

    /// Remove every participant silent for longer than `stale_after` and
    /// announce each departure. Returns the removed names, oldest query
    /// order, empty when nothing was stale.
    ///
    /// Deletion happens before the announcements: a failed announcement
    /// can lose a "left the room" line but never resurrect a participant,
    /// and a second overlapping reap finds nothing left to remove.
    pub async fn reap(&self, stale_after: Duration) -> Result<Vec<String>, PresenceError> {
        let cutoff = Utc::now() - stale_after;
        let stale = self.participants.find_stale(cutoff).await?;
        if stale.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = stale.into_iter().map(|p| p.name).collect();
        self.participants.remove_batch(&names).await?;

        let now = Utc::now();
        for name in &names {
            self.messages
                .append(&NewMessage::status(name.clone(), LEFT_THE_ROOM, now))
                .await
                .map_err(|e| PresenceError::Storage(e.to_string()))?;
        }

        info!(count = names.len(), "reaped inactive participants");
        Ok(names)
    }
}
