use crate::ConfigErrorResult;
use crate::error::check_range;

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::Deserialize;

pub const MAX_ATTEMPTS_RANGE: RangeInclusive<u32> = 1..=10;
pub const INITIAL_DELAY_MS_RANGE: RangeInclusive<u64> = 10..=10_000;
pub const MAX_DELAY_SECS_RANGE: RangeInclusive<u64> = 1..=60;
pub const BACKOFF_MULTIPLIER_RANGE: RangeInclusive<f64> = 1.0..=10.0;

/// Backoff for transient read failures against the table and repositories.
///
/// Delay for attempt `n` (1-based) is `initial_delay * multiplier^(n-1)`,
/// capped at `max_delay`; with `jitter` each delay is scaled by a random
/// factor in `0.5..1.5`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, the first one included
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_secs: u64,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 100,
            max_delay_secs: 5,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Single attempt, no waiting. Used by tests and one-shot commands.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            jitter: false,
            ..Self::default()
        }
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_secs(self.max_delay_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range("retry.max_attempts", self.max_attempts, &MAX_ATTEMPTS_RANGE)?;
        check_range(
            "retry.initial_delay_ms",
            self.initial_delay_ms,
            &INITIAL_DELAY_MS_RANGE,
        )?;
        check_range("retry.max_delay_secs", self.max_delay_secs, &MAX_DELAY_SECS_RANGE)?;
        check_range(
            "retry.backoff_multiplier",
            self.backoff_multiplier,
            &BACKOFF_MULTIPLIER_RANGE,
        )
    }
}
