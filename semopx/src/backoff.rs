use std::time::Duration;

use rand::Rng;
use semopx_core::BackoffConfig;

/// `base_ms` plus a random extra of up to `jitter_percent` percent of it.
pub fn jitter_wait(base_ms: u64, jitter_percent: u32) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms.saturating_add(rng.random_range(0..jitter_range))
}

/// Sleep before retry number `retry` (0-based), jitter applied.
pub fn retry_delay(cfg: &BackoffConfig, retry: u32) -> Duration {
    Duration::from_millis(jitter_wait(
        cfg.delay_ms(retry),
        u32::from(cfg.jitter_percent),
    ))
}
