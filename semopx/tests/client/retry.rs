use std::time::Duration;

use semopx::SemopxError;
use semopx_core::{IndexItem, IndexPage, Pagination};
use semopx_mock::{DynamicMockSource, MockBehavior};
use tokio::time::Instant;

use crate::helpers::*;

fn transport() -> MockBehavior<Option<IndexPage>> {
    MockBehavior::Fail(SemopxError::transport("scripted", "connection reset"))
}

#[tokio::test(start_paused = true)]
async fn transport_failure_restarts_walk_after_backoff() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    page_one_after(&ctrl, vec![transport()]).await;
    script_pages_from(&ctrl, 2).await;
    script_documents(&ctrl).await;
    let client = quick_builder().with_source(source).build().unwrap();

    let started = Instant::now();
    let report = client.fetch().await.unwrap();

    assert!(!report.is_empty());
    assert_eq!(started.elapsed(), Duration::from_secs(1));
    assert_eq!(ctrl.requested_pages().await, vec![1, 1, 2, 3, 4]);
}

#[tokio::test(start_paused = true)]
async fn structural_failure_is_retried() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    let half_page = IndexPage {
        items: Some(vec![IndexItem::new("2024-03-07T10:15:00", "x")]),
        pagination: Some(Pagination { total_pages: None }),
    };
    page_one_after(
        &ctrl,
        vec![
            MockBehavior::Return(Some(half_page)),
            MockBehavior::Return(None),
        ],
    )
    .await;
    script_pages_from(&ctrl, 2).await;
    script_documents(&ctrl).await;
    let client = quick_builder().with_source(source).build().unwrap();

    let started = Instant::now();
    client.fetch().await.unwrap();

    // Two retries: 1s then 2s.
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert_eq!(&ctrl.requested_pages().await[..3], &[1, 1, 1]);
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_max_attempts() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    ctrl.push_index_behavior(1, transport()).await;
    let client = quick_builder()
        .with_source(source)
        .backoff(exact_backoff(4))
        .build()
        .unwrap();

    let started = Instant::now();
    let err = client.fetch().await.unwrap_err();

    assert_eq!(err, SemopxError::transport("scripted", "connection reset"));
    assert_eq!(ctrl.requested_pages().await, vec![1, 1, 1, 1]);
    assert_eq!(started.elapsed(), Duration::from_secs(1 + 2 + 4));
}

#[tokio::test(start_paused = true)]
async fn backoff_is_capped() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    ctrl.push_index_behavior(1, transport()).await;
    let client = quick_builder()
        .with_source(source)
        .backoff(exact_backoff(8))
        .build()
        .unwrap();

    let started = Instant::now();
    client.fetch().await.unwrap_err();

    // 1 + 2 + 4 + 8 + 16 + 20 + 20 seconds between eight attempts.
    assert_eq!(started.elapsed(), Duration::from_secs(71));
    assert_eq!(ctrl.requested_pages().await.len(), 8);
}

#[tokio::test(start_paused = true)]
async fn jitter_only_lengthens_delays() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    ctrl.push_index_behavior(1, transport()).await;
    let mut backoff = exact_backoff(3);
    backoff.jitter_percent = 20;
    let client = quick_builder()
        .with_source(source)
        .backoff(backoff)
        .build()
        .unwrap();

    let started = Instant::now();
    client.fetch().await.unwrap_err();

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(3), "{elapsed:?}");
    assert!(elapsed <= Duration::from_millis(3_600), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn request_timeout_bounds_the_whole_fetch() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    ctrl.push_index_behavior(1, MockBehavior::Hang).await;
    let client = quick_builder()
        .with_source(source)
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = client.fetch().await.unwrap_err();

    assert!(
        matches!(&err, SemopxError::RequestTimeout { operation } if operation == "fetch"),
        "got {err:?}"
    );
    assert!(!err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn page_delay_precedes_every_page() {
    let (source, ctrl) = scripted_fixtures().await;
    let client = quick_builder()
        .with_source(source)
        .page_delay(Duration::from_secs(1))
        .build()
        .unwrap();

    let started = Instant::now();
    client.fetch().await.unwrap();

    assert_eq!(ctrl.requested_pages().await, vec![1, 2, 3, 4]);
    assert_eq!(started.elapsed(), Duration::from_secs(4));
}
