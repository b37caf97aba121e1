use crate::ConfigErrorResult;
use crate::error::check_range;

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::Deserialize;

pub const POLL_INTERVAL_SECS_RANGE: RangeInclusive<u64> = 1..=3600;
pub const REQUEST_TIMEOUT_SECS_RANGE: RangeInclusive<u64> = 1..=300;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Seconds between pulls in watch mode
    pub poll_interval_secs: u64,
    /// Upper bound on any single HTTP request
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            request_timeout_secs: 15,
        }
    }
}

impl SyncConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "sync.poll_interval_secs",
            self.poll_interval_secs,
            &POLL_INTERVAL_SECS_RANGE,
        )?;
        check_range(
            "sync.request_timeout_secs",
            self.request_timeout_secs,
            &REQUEST_TIMEOUT_SECS_RANGE,
        )
    }
}
