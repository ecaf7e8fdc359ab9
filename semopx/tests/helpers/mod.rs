// Re-export helpers so tests can `use crate::helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use semopx::{BackoffConfig, Semopx, SemopxBuilder, SessionKind};
use semopx_core::IndexPage;
use semopx_mock::{DynamicMockController, DynamicMockSource, MockBehavior, MockSource, fixtures};

pub use semopx_mock::fixtures::{DATES, HOURS};

/// Backoff with no jitter so retry timing is exact: 1s, 2s, 4s, ...
pub fn exact_backoff(max_attempts: u32) -> BackoffConfig {
    BackoffConfig {
        min_backoff_ms: 1_000,
        max_backoff_ms: 20_000,
        factor: 2,
        jitter_percent: 0,
        max_attempts,
    }
}

/// Builder with no page delay and exact backoff.
pub fn quick_builder() -> SemopxBuilder {
    Semopx::builder()
        .page_delay(Duration::ZERO)
        .backoff(exact_backoff(8))
}

/// Client over the static fixtures.
pub fn fixture_client() -> Semopx {
    quick_builder()
        .with_source(Arc::new(MockSource::new()))
        .min_days(100)
        .build()
        .unwrap()
}

/// Script every fixture document on `ctrl`.
pub async fn script_documents(ctrl: &DynamicMockController) {
    for date in DATES {
        for kind in SessionKind::ALL {
            let name = fixtures::resource_name(kind, date);
            let doc = fixtures::document(&name).unwrap();
            ctrl.set_document(name, doc).await;
        }
    }
}

/// Script index pages `from..=total` with the fixture pages.
pub async fn script_pages_from(ctrl: &DynamicMockController, from: u32) {
    for page in from..=fixtures::total_pages() {
        ctrl.set_index_page(page, fixtures::index_page(page).unwrap())
            .await;
    }
}

/// Dynamic source answering exactly like the fixtures.
pub async fn scripted_fixtures() -> (Arc<DynamicMockSource>, DynamicMockController) {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    script_pages_from(&ctrl, 1).await;
    script_documents(&ctrl).await;
    (source, ctrl)
}

/// Page 1 answers with each behavior in turn, then with the fixture page.
pub async fn page_one_after(
    ctrl: &DynamicMockController,
    failures: Vec<MockBehavior<Option<IndexPage>>>,
) {
    for b in failures {
        ctrl.push_index_behavior(1, b).await;
    }
    ctrl.push_index_behavior(1, MockBehavior::Return(fixtures::index_page(1)))
        .await;
}

pub fn approx(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-12)
}
