use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use rand::Rng;
use tracing::{debug, warn};

use crate::{DbError, DbResult, StoreSettings};

/// Stand-in for the network hop between a screen and its backend: a delay of
/// `latency + rand(0..=jitter)` followed by a failure roll.
#[derive(Debug)]
pub struct SimulatedNetwork {
    latency: Duration,
    jitter_ms: u64,
    failure_rate: AtomicU64,
}

impl SimulatedNetwork {
    pub fn new(latency: Duration, jitter: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            jitter_ms: jitter.as_millis() as u64,
            failure_rate: AtomicU64::new(clamp_rate(failure_rate).to_bits()),
        }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, 0.0)
    }

    pub fn from_settings(settings: &StoreSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.latency_ms),
            Duration::from_millis(settings.jitter_ms),
            settings.failure_rate,
        )
    }

    pub fn failure_rate(&self) -> f64 {
        f64::from_bits(self.failure_rate.load(Ordering::Relaxed))
    }

    pub fn set_failure_rate(&self, rate: f64) {
        self.failure_rate
            .store(clamp_rate(rate).to_bits(), Ordering::Relaxed);
    }

    /// Wait out the simulated delay, then fail with the configured probability.
    pub async fn round_trip(&self, kind: &'static str, op: &'static str) -> DbResult<()> {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.roll_failure() {
            warn!(kind, op, "simulated request failed");
            return Err(DbError::Unavailable { kind, op });
        }
        debug!(kind, op, delay_ms = delay.as_millis() as u64, "simulated request");
        Ok(())
    }

    fn next_delay(&self) -> Duration {
        if self.jitter_ms == 0 {
            return self.latency;
        }
        let extra = rand::thread_rng().gen_range(0..=self.jitter_ms);
        self.latency + Duration::from_millis(extra)
    }

    fn roll_failure(&self) -> bool {
        let rate = self.failure_rate();
        if rate <= 0.0 {
            return false;
        }
        rand::thread_rng().gen_bool(rate)
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}
