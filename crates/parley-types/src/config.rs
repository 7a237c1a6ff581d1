//! Server configuration types.
//!
//! Deserialized from `config.toml` in the data directory; every field has a
//! default so a missing or partial file still yields a runnable config.

use serde::{Deserialize, Serialize};

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port for the HTTP listener.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Inactivity sweep tuning.
    #[serde(default)]
    pub sweep: SweepSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            sweep: SweepSettings::default(),
        }
    }
}

/// Tuning for the periodic inactivity sweep.
///
/// With the defaults (check every 15 s, evict after 10 s of silence) a
/// participant that stops sending heartbeats is removed 10-25 s after its
/// last one, depending on where the next tick lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSettings {
    /// How often the sweep runs, in milliseconds.
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,

    /// How long a participant may stay silent before eviction, in milliseconds.
    #[serde(default = "default_stale_after_ms")]
    pub stale_after_ms: u64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            check_interval_ms: default_check_interval_ms(),
            stale_after_ms: default_stale_after_ms(),
        }
    }
}

impl SweepSettings {
    /// Tick period for the sweep timer.
    pub fn check_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.check_interval_ms)
    }

    /// Staleness threshold as a chrono duration, for timestamp arithmetic.
    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.stale_after_ms as i64)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_check_interval_ms() -> u64 {
    15_000
}

fn default_stale_after_ms() -> u64 {
    10_000
}
