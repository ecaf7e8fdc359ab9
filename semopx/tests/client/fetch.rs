use std::sync::Arc;

use semopx::{SemopxError, SessionKind};
use semopx_core::{IndexItem, IndexPage, ResultDocument, ResultRow};
use semopx_mock::{DynamicMockSource, fixtures};

use crate::helpers::*;

#[tokio::test]
async fn fixture_fetch_prefers_latest_auction() {
    let report = fixture_client().fetch().await.unwrap();

    assert_eq!(report.len(), DATES.len() * HOURS as usize);
    for rec in report.records() {
        assert_eq!(rec.market_area, "ROI");
        assert_eq!(rec.currency, "euro");
        assert!(rec.da_kwh_rate.is_some());
        assert!(rec.ida1_kwh_rate.is_some());
        assert!(rec.ida2_kwh_rate.is_some());
        assert_eq!(rec.final_kwh_rate, rec.ida3_kwh_rate);
    }

    // 2024-03-01T01:00:00Z; Dublin is on UTC in early March.
    let rec = report.get(1_709_254_800).unwrap();
    assert_eq!(rec.datetime, "2024/03/01 01:00:00");
    assert_eq!(
        rec.da_kwh_rate,
        Some(fixtures::roi_price(SessionKind::DayAhead, 1) / 1000.0)
    );
}

#[tokio::test]
async fn report_serializes_under_areas() {
    let report = fixture_client().fetch().await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    let areas = json["areas"].as_object().unwrap();
    assert_eq!(areas.len(), report.len());
    let first = areas.get("1709251200").unwrap();
    assert_eq!(first["ts"], 1_709_251_200);
    assert_eq!(first["market_area"], "ROI");
    assert!(first.get("final_kwh_rate").is_some());
}

#[tokio::test]
async fn empty_index_still_has_areas_key() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    ctrl.set_index_page(1, IndexPage::new(vec![], 1)).await;
    let client = quick_builder().with_source(source).build().unwrap();

    let report = client.fetch().await.unwrap();

    assert!(report.is_empty());
    assert_eq!(serde_json::to_string(&report).unwrap(), r#"{"areas":{}}"#);
}

#[tokio::test]
async fn other_market_area_selects_other_rows() {
    let client = quick_builder()
        .with_source(Arc::new(semopx_mock::MockSource::new()))
        .min_days(100)
        .market_area("NI")
        .currency("gbp")
        .build()
        .unwrap();

    let report = client.fetch().await.unwrap();

    let rec = report.get(1_709_251_200).unwrap();
    assert_eq!(rec.market_area, "NI");
    assert_eq!(rec.currency, "gbp");
    assert_eq!(
        rec.da_kwh_rate,
        Some((fixtures::roi_price(SessionKind::DayAhead, 0) + 50.0) / 1000.0)
    );
}

#[tokio::test]
async fn invalid_timezone_fails_before_any_request() {
    let (source, ctrl) = scripted_fixtures().await;
    let client = quick_builder()
        .with_source(source)
        .timezone("Mars/Olympus_Mons")
        .build()
        .unwrap();

    let err = client.fetch().await.unwrap_err();

    assert!(matches!(err, SemopxError::InvalidConfig(_)), "got {err:?}");
    assert!(!err.is_retryable());
    assert!(ctrl.requested_pages().await.is_empty());
    assert!(ctrl.document_requests().await.is_empty());
}

#[tokio::test]
async fn missing_documents_are_skipped() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    script_pages_from(&ctrl, 1).await;
    // Only day-ahead documents answer; every intraday document has no content.
    for date in DATES {
        let name = fixtures::resource_name(SessionKind::DayAhead, date);
        ctrl.set_document(name.clone(), fixtures::document(&name).unwrap())
            .await;
    }
    let client = quick_builder()
        .with_source(source)
        .min_days(100)
        .build()
        .unwrap();

    let report = client.fetch().await.unwrap();

    assert_eq!(report.len(), DATES.len() * HOURS as usize);
    for rec in report.records() {
        assert_eq!(rec.ida1_kwh_rate, None);
        assert_eq!(rec.final_kwh_rate, rec.da_kwh_rate);
    }
}

#[tokio::test]
async fn unparseable_timestamp_is_not_retried() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("scripted");
    ctrl.set_index_page(
        1,
        IndexPage::new(
            vec![IndexItem::new("2024-01-01T10:00:00", "MarketResult_SEM-DA_x")],
            1,
        ),
    )
    .await;
    ctrl.set_document(
        "MarketResult_SEM-DA_x",
        ResultDocument {
            rows: vec![ResultRow::new("ROI-DA", ["01/01/2024 00:00"], [10.0])],
        },
    )
    .await;
    let client = quick_builder().with_source(source).build().unwrap();

    let err = client.fetch().await.unwrap_err();

    assert!(matches!(err, SemopxError::Data(_)), "got {err:?}");
    assert_eq!(ctrl.requested_pages().await, vec![1]);
}

#[tokio::test]
async fn concurrent_fetches_share_one_client() {
    let client = fixture_client();

    let (a, b) = tokio::join!(client.fetch(), client.fetch());

    assert_eq!(a.unwrap(), b.unwrap());
}
