//! Message types for the room's append-only message log.
//!
//! A message is immutable once written. Ordering is by `seq`, the
//! store-assigned insertion sequence -- the `time` field has only second
//! resolution and is display-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Recipient sentinel meaning "broadcast to everyone in the room".
pub const BROADCAST: &str = "Todos";

/// What kind of message a log entry is.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (kind IN ('status', 'message', 'private_message'))`
///
/// `Status` entries are system-generated join/leave announcements; clients
/// may only post `Message` and `PrivateMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Status,
    Message,
    PrivateMessage,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Status => write!(f, "status"),
            MessageKind::Message => write!(f, "message"),
            MessageKind::PrivateMessage => write!(f, "private_message"),
        }
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(MessageKind::Status),
            "message" => Ok(MessageKind::Message),
            "private_message" => Ok(MessageKind::PrivateMessage),
            other => Err(format!("invalid message kind: '{other}'")),
        }
    }
}

/// A stored message, as read back from the log.
///
/// `seq` is assigned by the store on insert and strictly increases with
/// insertion order; "newest-first" means descending `seq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub seq: i64,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Wall-clock time of creation, formatted HH:MM:SS.
    pub time: String,
}

/// A message about to be written -- everything but the store-assigned `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub from: String,
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
    pub time: String,
}

impl NewMessage {
    /// A user-posted message, stamped with the current wall-clock time.
    pub fn user(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
        kind: MessageKind,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            kind,
            time: format_clock(at),
        }
    }

    /// A system status announcement broadcast to the whole room.
    pub fn status(from: impl Into<String>, text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            from: from.into(),
            to: BROADCAST.to_string(),
            text: text.into(),
            kind: MessageKind::Status,
            time: format_clock(at),
        }
    }
}

/// Format a timestamp as the HH:MM:SS wall-clock string stored on messages.
pub fn format_clock(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}
