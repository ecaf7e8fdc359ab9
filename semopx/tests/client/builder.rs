use std::sync::Arc;

use semopx::{BackoffConfig, Semopx, SemopxError};
use semopx_mock::MockSource;

use crate::helpers::*;

#[test]
fn build_requires_a_source() {
    let err = Semopx::builder().build().err().unwrap();
    assert!(matches!(err, SemopxError::InvalidArg(_)), "got {err:?}");
}

#[test]
fn build_rejects_empty_market_area() {
    let err = Semopx::builder()
        .with_source(Arc::new(MockSource::new()))
        .market_area(" ")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, SemopxError::InvalidArg(_)), "got {err:?}");
}

#[test]
fn build_rejects_unusable_backoff() {
    for backoff in [
        exact_backoff(0),
        BackoffConfig {
            min_backoff_ms: 30_000,
            ..exact_backoff(3)
        },
        BackoffConfig {
            jitter_percent: 101,
            ..exact_backoff(3)
        },
    ] {
        let err = Semopx::builder()
            .with_source(Arc::new(MockSource::new()))
            .backoff(backoff)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SemopxError::InvalidConfig(_)), "got {err:?}");
    }
}

#[test]
fn defaults_target_roi_in_dublin() {
    let client = Semopx::builder()
        .with_source(Arc::new(MockSource::new()))
        .build()
        .unwrap();

    let cfg = client.config();
    assert_eq!(cfg.currency, "euro");
    assert_eq!(cfg.market_area, "ROI");
    assert_eq!(cfg.timezone, "Europe/Dublin");
    assert_eq!(cfg.min_days, 5);
    assert_eq!(cfg.page_delay, std::time::Duration::from_secs(1));
    assert_eq!(cfg.backoff, BackoffConfig::default());
    assert_eq!(client.source_name(), "semopx-mock");
}

#[test]
fn timezone_is_not_resolved_at_build() {
    let client = quick_builder()
        .with_source(Arc::new(MockSource::new()))
        .timezone("Nowhere/Special")
        .build();
    assert!(client.is_ok());
}
