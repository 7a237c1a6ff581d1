//! Infrastructure layer for Parley.
//!
//! SQLite-backed implementations of the parley-core repository traits,
//! plus the `config.toml` loader.

pub mod config;
pub mod sqlite;
