//! Business logic for the Parley chat backend.
//!
//! Repository traits define the storage interface (implemented in
//! parley-infra); services own the presence lifecycle, the message
//! visibility model, and the periodic inactivity sweep. This crate never
//! depends on parley-infra.

pub mod message;
pub mod presence;
pub mod sweep;

#[cfg(test)]
pub(crate) mod testutil;
