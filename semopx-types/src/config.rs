//! Configuration types shared by the orchestrator and the core algorithms.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::IndexQuery;

/// Exponential backoff configuration for retrying a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the first retry, in milliseconds.
    pub min_backoff_ms: u64,
    /// Ceiling for any single delay, in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor to increase delay after each failure (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
    /// Total attempts including the first; the last error is returned once spent.
    pub max_attempts: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            min_backoff_ms: 1_000,
            max_backoff_ms: 20_000,
            factor: 2,
            jitter_percent: 20,
            max_attempts: 8,
        }
    }
}

impl BackoffConfig {
    /// Delay before retry number `retry` (0-based), before jitter.
    ///
    /// Grows by `factor` per retry and saturates at `max_backoff_ms`.
    #[must_use]
    pub fn delay_ms(&self, retry: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 0..retry {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                break;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

/// Global configuration for the `Semopx` client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemopxConfig {
    /// Currency label stamped on every record.
    pub currency: String,
    /// Market area code; rows whose area descriptor lacks it are ignored.
    pub market_area: String,
    /// IANA timezone used to render record datetimes and calendar buckets.
    pub timezone: String,
    /// Stop walking the index once more than this many dates have been seen.
    pub min_days: usize,
    /// Pause before every index page request.
    pub page_delay: Duration,
    /// Static query parameters of the index; the page number is set per request.
    pub index_query: IndexQuery,
    /// Retry policy for transport and structural failures.
    pub backoff: BackoffConfig,
    /// Optional deadline for a whole fetch, retries and backoff included.
    pub request_timeout: Option<Duration>,
}

impl Default for SemopxConfig {
    fn default() -> Self {
        Self {
            currency: "euro".to_string(),
            market_area: "ROI".to_string(),
            timezone: "Europe/Dublin".to_string(),
            min_days: 5,
            page_delay: Duration::from_secs(1),
            index_query: IndexQuery::default(),
            backoff: BackoffConfig::default(),
            request_timeout: None,
        }
    }
}
