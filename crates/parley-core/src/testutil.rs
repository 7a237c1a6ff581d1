//! In-memory repository implementations for service-level tests.
//!
//! Mirror the store's contract closely enough to exercise the services:
//! the participant mock enforces the name uniqueness constraint, the
//! message mock assigns sequence numbers and applies the visibility
//! predicate. Clones share state, so tests can hold a handle for
//! assertions while the service owns its own.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use parley_types::error::RepositoryError;
use parley_types::message::{ChatMessage, MessageKind, NewMessage, BROADCAST};
use parley_types::participant::Participant;

use crate::message::repository::MessageRepository;
use crate::presence::repository::ParticipantRepository;

#[derive(Clone, Default)]
pub(crate) struct MemParticipants {
    rows: Arc<Mutex<Vec<Participant>>>,
}

impl MemParticipants {
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.rows.lock().unwrap().iter().any(|p| p.name == name)
    }

    pub(crate) fn last_status(&self, name: &str) -> Option<DateTime<Utc>> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.last_status)
    }

    /// Push a participant's last heartbeat into the past.
    pub(crate) fn age(&self, name: &str, by: Duration) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(p) = rows.iter_mut().find(|p| p.name == name) {
            p.last_status -= by;
        }
    }
}

impl ParticipantRepository for MemParticipants {
    async fn insert(&self, participant: &Participant) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|p| p.name == participant.name) {
            return Err(RepositoryError::Conflict(participant.name.clone()));
        }
        rows.push(participant.clone());
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Participant>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Participant>, RepositoryError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.name == name) {
            Some(p) => {
                p.last_status = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Participant>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.last_status < cutoff)
            .cloned()
            .collect())
    }

    async fn remove_batch(&self, names: &[String]) -> Result<u64, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| !names.contains(&p.name));
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemMessages {
    rows: Arc<Mutex<Vec<ChatMessage>>>,
}

impl MemMessages {
    pub(crate) fn all(&self) -> Vec<ChatMessage> {
        self.rows.lock().unwrap().clone()
    }
}

impl MessageRepository for MemMessages {
    async fn append(&self, message: &NewMessage) -> Result<ChatMessage, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let stored = ChatMessage {
            seq: rows.len() as i64 + 1,
            from: message.from.clone(),
            to: message.to.clone(),
            text: message.text.clone(),
            kind: message.kind,
            time: message.time.clone(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn visible_to(
        &self,
        caller: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut visible: Vec<ChatMessage> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                m.kind == MessageKind::Status
                    || m.from == caller
                    || m.to == caller
                    || m.to == BROADCAST
            })
            .cloned()
            .collect();
        visible.reverse();
        if let Some(limit) = limit {
            visible.truncate(limit.max(0) as usize);
        }
        Ok(visible)
    }
}
