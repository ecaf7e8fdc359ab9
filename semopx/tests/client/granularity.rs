use chrono::NaiveDate;

use semopx::{FetchRequest, Granularity, SessionKind};
use semopx_mock::fixtures;

use crate::helpers::*;

/// 2024-03-01T00:00:00Z, local midnight in Dublin.
const MAR_1: i64 = 1_709_251_200;
const DAY: i64 = 86_400;

fn mean_rate(kind: SessionKind) -> f64 {
    let sum: f64 = (0..HOURS).map(|h| fixtures::roi_price(kind, h) / 1000.0).sum();
    sum / f64::from(HOURS)
}

#[tokio::test]
async fn hourly_keeps_native_cadence() {
    let client = fixture_client();
    assert_eq!(
        client.hourly(None).await.unwrap(),
        client.fetch().await.unwrap()
    );
}

#[tokio::test]
async fn end_date_drops_later_days() {
    let report = fixture_client()
        .hourly(NaiveDate::from_ymd_opt(2024, 3, 2))
        .await
        .unwrap();

    assert_eq!(report.len(), 2 * HOURS as usize);
    assert!(report.records().all(|r| r.ts < MAR_1 + 2 * DAY));
}

#[tokio::test]
async fn daily_means_per_session() {
    let report = fixture_client().daily(None).await.unwrap();

    assert_eq!(report.len(), DATES.len());
    let day = report.get(MAR_1).unwrap();
    assert_eq!(day.datetime, "2024/03/01 00:00:00");
    assert!(approx(day.da_kwh_rate, mean_rate(SessionKind::DayAhead)));
    assert!(approx(day.ida3_kwh_rate, mean_rate(SessionKind::Ida3)));
    assert_eq!(day.final_kwh_rate, day.ida3_kwh_rate);
}

#[tokio::test]
async fn weekly_monthly_yearly_buckets() {
    let client = fixture_client();

    // Fixtures span Fri 2024-03-01 to Thu 2024-03-07: weeks of Feb 26 and Mar 4.
    let weekly = client.weekly(None).await.unwrap();
    let keys: Vec<i64> = weekly.records().map(|r| r.ts).collect();
    assert_eq!(keys, vec![MAR_1 - 4 * DAY, MAR_1 + 3 * DAY]);

    let monthly = client.monthly(None).await.unwrap();
    assert_eq!(monthly.len(), 1);
    assert!(approx(
        monthly.get(MAR_1).unwrap().final_kwh_rate,
        mean_rate(SessionKind::Ida3)
    ));

    let yearly = client.yearly(None).await.unwrap();
    // 2024-01-01T00:00:00Z
    assert!(yearly.get(1_704_067_200).is_some());
    assert_eq!(yearly.len(), 1);
}

#[tokio::test]
async fn end_date_applies_before_resampling() {
    let client = fixture_client();

    let req =
        FetchRequest::new(Granularity::Weekly).end_date(NaiveDate::from_ymd_opt(2024, 3, 3));
    let weekly = client.fetch_with(req).await.unwrap();

    assert_eq!(weekly.len(), 1);
    assert!(weekly.get(MAR_1 - 4 * DAY).is_some());
}
