use crate::StoreError;

use drawat_config::RetryConfig;

use std::fmt::Display;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::sleep;

/// Errors that may succeed when the same request is sent again.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for StoreError {
    fn is_retryable(&self) -> bool {
        StoreError::is_retryable(self)
    }
}

/// Delays between attempts: `initial * multiplier^n`, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    cap: Duration,
    multiplier: f64,
    jitter: bool,
}

impl Backoff {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            next: config.initial_delay().min(config.max_delay()),
            cap: config.max_delay(),
            multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }

    /// Un-jittered delay the next call to `next_delay` is based on.
    pub fn peek(&self) -> Duration {
        self.next
    }

    pub fn next_delay(&mut self) -> Duration {
        let base = self.next;
        self.next = base.mul_f64(self.multiplier).min(self.cap);

        if self.jitter {
            // 0.5x..1.5x
            base.mul_f64(0.5 + rand::random::<f64>())
        } else {
            base
        }
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// `config.max_attempts` is used up. The last error is returned.
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display + IsRetryable,
{
    let max_attempts = config.max_attempts.max(1);
    let mut backoff = Backoff::new(config);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let err = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if attempt >= max_attempts || !err.is_retryable() {
            if attempt > 1 {
                warn!(
                    "[WARN] {} gave up after {} attempts: {}",
                    operation_name, attempt, err
                );
            }
            return Err(err);
        }

        let delay = backoff.next_delay();
        debug!(
            "{} attempt {}/{} failed ({}), retrying in {:?}",
            operation_name, attempt, max_attempts, err, delay
        );
        sleep(delay).await;
    }
}
