//! Participant type for room presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One active room member.
///
/// `name` is the unique identifier within the room (case-sensitive, format
/// unvalidated beyond non-emptiness). `last_status` is the liveness
/// timestamp: set at registration, refreshed by heartbeat, and compared
/// against the staleness cutoff by the sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub last_status: DateTime<Utc>,
}

impl Participant {
    /// Create a participant whose liveness clock starts now.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_status: Utc::now(),
        }
    }

    /// Whether this participant's last heartbeat predates `cutoff`.
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_status < cutoff
    }
}
