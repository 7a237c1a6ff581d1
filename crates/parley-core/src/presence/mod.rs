//! Participant presence: registration, heartbeat, and the inactivity reap.

pub mod repository;
pub mod service;

pub use repository::ParticipantRepository;
pub use service::PresenceService;
