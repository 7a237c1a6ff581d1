//! Message service: posting with sender validation, reading with the
//! per-caller visibility filter.

use chrono::Utc;
use tracing::debug;

use parley_types::error::MessageError;
use parley_types::message::{ChatMessage, MessageKind, NewMessage};

use crate::message::repository::MessageRepository;
use crate::presence::repository::ParticipantRepository;

/// Orchestrates message creation and visibility-filtered reads.
///
/// Generic over `ParticipantRepository` and `MessageRepository` to maintain
/// clean architecture (parley-core never depends on parley-infra).
pub struct MessageService<P: ParticipantRepository, M: MessageRepository> {
    participants: P,
    messages: M,
}

impl<P: ParticipantRepository, M: MessageRepository> MessageService<P, M> {
    /// Create a new message service with the given repositories.
    pub fn new(participants: P, messages: M) -> Self {
        Self {
            participants,
            messages,
        }
    }

    /// Post a message from a registered participant.
    ///
    /// `to` and `text` must be non-empty; `kind` must be `message` or
    /// `private_message` -- status entries are reserved for the presence
    /// side. Fire-and-forget: success carries no payload.
    pub async fn post(
        &self,
        from: &str,
        to: &str,
        text: &str,
        kind: MessageKind,
    ) -> Result<(), MessageError> {
        if from.trim().is_empty() {
            return Err(MessageError::Invalid("sender is required".to_string()));
        }
        if to.trim().is_empty() {
            return Err(MessageError::Invalid(
                "'to' must be a non-empty string".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(MessageError::Invalid(
                "'text' must be a non-empty string".to_string(),
            ));
        }
        if kind == MessageKind::Status {
            return Err(MessageError::Invalid(
                "'type' must be 'message' or 'private_message'".to_string(),
            ));
        }

        if self.participants.find_by_name(from).await?.is_none() {
            return Err(MessageError::UnknownSender(from.to_string()));
        }

        let stored = self
            .messages
            .append(&NewMessage::user(from, to, text, kind, Utc::now()))
            .await?;
        debug!(seq = stored.seq, from, "message posted");
        Ok(())
    }

    /// Messages visible to `caller`, newest-first.
    ///
    /// `limit` truncates to the most recent N of the visible set; `None`
    /// means unlimited. The visibility predicate is an OR of four
    /// conditions, deliberately permissive: everyone sees every status
    /// entry and every broadcast, plus anything they sent or received.
    pub async fn list(
        &self,
        caller: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>, MessageError> {
        Ok(self.messages.visible_to(caller, limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::PresenceService;
    use crate::testutil::{MemMessages, MemParticipants};
    use parley_types::message::BROADCAST;

    fn services() -> (
        PresenceService<MemParticipants, MemMessages>,
        MessageService<MemParticipants, MemMessages>,
        MemMessages,
    ) {
        let participants = MemParticipants::default();
        let messages = MemMessages::default();
        let presence = PresenceService::new(participants.clone(), messages.clone());
        let router = MessageService::new(participants, messages.clone());
        (presence, router, messages)
    }

    #[tokio::test]
    async fn post_from_registered_sender() {
        let (presence, router, messages) = services();

        presence.register("ana").await.unwrap();
        router
            .post("ana", BROADCAST, "oi", MessageKind::Message)
            .await
            .unwrap();

        let log = messages.all();
        assert_eq!(log.last().unwrap().text, "oi");
        assert_eq!(log.last().unwrap().kind, MessageKind::Message);
    }

    #[tokio::test]
    async fn post_from_unregistered_sender_fails() {
        let (_, router, _) = services();

        let err = router
            .post("ana", BROADCAST, "oi", MessageKind::Message)
            .await
            .unwrap_err();
        assert!(matches!(err, MessageError::UnknownSender(name) if name == "ana"));
    }

    #[tokio::test]
    async fn post_rejects_empty_fields() {
        let (presence, router, _) = services();
        presence.register("ana").await.unwrap();

        for (to, text) in [("", "oi"), ("bia", ""), ("  ", "oi"), ("bia", "  ")] {
            let err = router
                .post("ana", to, text, MessageKind::Message)
                .await
                .unwrap_err();
            assert!(matches!(err, MessageError::Invalid(_)));
        }
    }

    #[tokio::test]
    async fn post_rejects_status_kind() {
        let (presence, router, _) = services();
        presence.register("ana").await.unwrap();

        let err = router
            .post("ana", BROADCAST, "oi", MessageKind::Status)
            .await
            .unwrap_err();
        assert!(matches!(err, MessageError::Invalid(_)));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filtered() {
        let (presence, router, _) = services();

        presence.register("ana").await.unwrap();
        presence.register("bia").await.unwrap();
        router
            .post("ana", BROADCAST, "oi", MessageKind::Message)
            .await
            .unwrap();
        router
            .post("bia", "carla", "segredo", MessageKind::PrivateMessage)
            .await
            .unwrap();

        // ana sees both join announcements and the broadcast, but not the
        // private message from bia to carla.
        let visible = router.list("ana", None).await.unwrap();
        assert!(visible.iter().all(|m| m.text != "segredo"));
        assert_eq!(visible[0].text, "oi");

        let seqs: Vec<i64> = visible.iter().map(|m| m.seq).collect();
        let mut sorted = seqs.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(seqs, sorted);
    }

    #[tokio::test]
    async fn list_honors_limit() {
        let (presence, router, _) = services();

        presence.register("ana").await.unwrap();
        for i in 0..5 {
            router
                .post("ana", BROADCAST, &format!("msg {i}"), MessageKind::Message)
                .await
                .unwrap();
        }

        let visible = router.list("ana", Some(2)).await.unwrap();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].text, "msg 4");
        assert_eq!(visible[1].text, "msg 3");
    }
}
