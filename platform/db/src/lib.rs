//! In-memory record store. Every table access goes through a simulated
//! network round trip that can be slowed down or made to fail.

mod credentials;
mod network;
mod seed;
mod store;
mod table;

use serde::Deserialize;
use thiserror::Error;

pub use credentials::{hash_password, verify_password};
pub use network::SimulatedNetwork;
pub use seed::{SeedRecords, seed_records};
pub use store::{MemoryStore, SeedSummary};
pub use table::{Record, Table};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DbError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} {id} already exists")]
    DuplicateId { kind: &'static str, id: String },
    #[error("simulated {op} on {kind} failed")]
    Unavailable { kind: &'static str, op: &'static str },
    #[error("password hashing failed: {0}")]
    Credentials(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven settings for the store and its simulated network.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StoreSettings {
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,
    #[serde(default)]
    pub failure_rate: f64,
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_latency_ms() -> u64 {
    500
}

fn default_jitter_ms() -> u64 {
    250
}

fn default_seed() -> bool {
    true
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            jitter_ms: default_jitter_ms(),
            failure_rate: 0.0,
            seed: default_seed(),
        }
    }
}

impl StoreSettings {
    /// Zero latency, no failures, seeded. What tests run against.
    pub fn instant() -> Self {
        Self {
            latency_ms: 0,
            jitter_ms: 0,
            failure_rate: 0.0,
            seed: true,
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            latency_ms: env_parse("CRM_LATENCY_MS").unwrap_or(defaults.latency_ms),
            jitter_ms: env_parse("CRM_LATENCY_JITTER_MS").unwrap_or(defaults.jitter_ms),
            failure_rate: env_parse("CRM_FAILURE_RATE").unwrap_or(defaults.failure_rate),
            seed: std::env::var("CRM_SEED")
                .ok()
                .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.seed),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.trim().parse().ok())
}
