//! Periodic inactivity sweep.
//!
//! A single background task on a fixed interval, independent of request
//! handling. Each tick asks the presence service to reap participants whose
//! last heartbeat predates the staleness threshold; departures are logged,
//! failures are logged and do not stop the loop. The reap itself is
//! idempotent, so a tick overlapping a slow predecessor removes nothing
//! twice.

use std::sync::Arc;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use parley_types::config::SweepSettings;

use crate::message::repository::MessageRepository;
use crate::presence::repository::ParticipantRepository;
use crate::presence::PresenceService;

/// Drives `PresenceService::reap` on a fixed schedule.
pub struct Sweeper<P: ParticipantRepository, M: MessageRepository> {
    presence: Arc<PresenceService<P, M>>,
    settings: SweepSettings,
}

impl<P: ParticipantRepository, M: MessageRepository> Sweeper<P, M> {
    /// Create a sweeper over the shared presence service.
    pub fn new(presence: Arc<PresenceService<P, M>>, settings: SweepSettings) -> Self {
        Self { presence, settings }
    }

    /// Run until `cancel` fires.
    ///
    /// The first tick completes immediately, which is harmless: against a
    /// freshly started room the stale set is empty.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.settings.check_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            check_interval_ms = self.settings.check_interval_ms,
            stale_after_ms = self.settings.stale_after_ms,
            "inactivity sweep started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("inactivity sweep stopped");
                    break;
                }
                _ = ticker.tick() => self.sweep_once().await,
            }
        }
    }

    async fn sweep_once(&self) {
        match self.presence.reap(self.settings.stale_after()).await {
            Ok(removed) if removed.is_empty() => {}
            Ok(removed) => {
                info!(count = removed.len(), names = ?removed, "evicted inactive participants");
            }
            Err(err) => {
                warn!(error = %err, "inactivity sweep failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MemMessages, MemParticipants};
    use chrono::Duration;

    #[tokio::test(start_paused = true)]
    async fn sweeper_evicts_and_announces() {
        let participants = MemParticipants::default();
        let messages = MemMessages::default();
        let presence = Arc::new(PresenceService::new(
            participants.clone(),
            messages.clone(),
        ));

        presence.register("ana").await.unwrap();
        participants.age("ana", Duration::seconds(60));

        let settings = SweepSettings {
            check_interval_ms: 100,
            stale_after_ms: 10_000,
        };
        let cancel = CancellationToken::new();
        let sweeper = Sweeper::new(presence, settings);
        let handle = tokio::spawn(sweeper.run(cancel.clone()));

        // Paused clock: sleeping past the first tick lets the sweep run.
        tokio::time::sleep(std::time::Duration::from_millis(150)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert!(!participants.contains("ana"));
        assert!(messages.all().iter().any(|m| m.text == "left the room"));
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_stops_on_cancel() {
        let participants = MemParticipants::default();
        let messages = MemMessages::default();
        let presence = Arc::new(PresenceService::new(participants, messages));

        let cancel = CancellationToken::new();
        let sweeper = Sweeper::new(presence, SweepSettings::default());
        let handle = tokio::spawn(sweeper.run(cancel.clone()));

        cancel.cancel();
        handle.await.unwrap();
    }
}
