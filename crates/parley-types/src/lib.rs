//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley chat
//! backend: Participant, ChatMessage, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod participant;
