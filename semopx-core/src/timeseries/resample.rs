use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::time::format_local;
use semopx_types::{Granularity, PriceRecord, PriceReport, SessionKind};

fn local_date(ts: i64, tz: Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&tz).date_naive())
}

/// First calendar day of the bucket containing `date`.
fn bucket_start_date(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Hourly | Granularity::Daily => date,
        Granularity::Weekly => {
            let days_from_monday = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(days_from_monday))
                .unwrap_or(date)
        }
        Granularity::Monthly => date.with_day(1).unwrap_or(date),
        Granularity::Yearly => date.with_ordinal(1).unwrap_or(date),
    }
}

/// Start of `date` in `tz`.
///
/// On a fall-back overlap the earlier instant wins; where midnight is skipped
/// by a spring-forward transition the day starts at 01:00.
fn local_day_start(date: NaiveDate, tz: Tz) -> Option<DateTime<Tz>> {
    [0, 1].into_iter().find_map(|hour| {
        let naive = date.and_hms_opt(hour, 0, 0)?;
        tz.from_local_datetime(&naive).earliest()
    })
}

/// Drop records whose local calendar date in `tz` is after `end_date`.
pub fn retain_until(report: &mut PriceReport, end_date: NaiveDate, tz: Tz) {
    report
        .areas
        .retain(|&ts, _| local_date(ts, tz).is_none_or(|d| d <= end_date));
}

struct BucketAgg {
    start: DateTime<Tz>,
    market_area: String,
    currency: String,
    sums: [f64; 4],
    counts: [u32; 4],
}

const fn slot(kind: SessionKind) -> usize {
    match kind {
        SessionKind::DayAhead => 0,
        SessionKind::Ida1 => 1,
        SessionKind::Ida2 => 2,
        SessionKind::Ida3 => 3,
    }
}

impl BucketAgg {
    fn new(start: DateTime<Tz>, template: &PriceRecord) -> Self {
        Self {
            start,
            market_area: template.market_area.clone(),
            currency: template.currency.clone(),
            sums: [0.0; 4],
            counts: [0; 4],
        }
    }

    fn add(&mut self, rec: &PriceRecord) {
        for (kind, value) in rec.sessions() {
            self.sums[slot(kind)] += value;
            self.counts[slot(kind)] += 1;
        }
    }

    fn finish(self) -> PriceRecord {
        let mut out = PriceRecord::new(
            self.start.timestamp(),
            format_local(&self.start),
            self.market_area,
            self.currency,
        );
        for kind in SessionKind::ALL {
            let n = self.counts[slot(kind)];
            if n > 0 {
                out.set_rate(kind, self.sums[slot(kind)] / f64::from(n));
            }
        }
        out.finalize();
        out
    }
}

/// Aggregate records into calendar buckets of `granularity` in `tz`.
///
/// - `Hourly` returns the records unchanged.
/// - Other cadences key each bucket by its local start instant (weeks start on
///   Monday). Every session rate is the mean over the records carrying it, and
///   `final_kwh_rate` is recomputed by session priority from those means.
#[must_use]
pub fn resample(report: &PriceReport, granularity: Granularity, tz: Tz) -> PriceReport {
    if granularity == Granularity::Hourly {
        return report.clone();
    }

    let mut buckets: BTreeMap<i64, BucketAgg> = BTreeMap::new();
    for rec in report.records() {
        let Some(date) = local_date(rec.ts, tz) else {
            continue;
        };
        let Some(start) = local_day_start(bucket_start_date(date, granularity), tz) else {
            continue;
        };
        buckets
            .entry(start.timestamp())
            .or_insert_with(|| BucketAgg::new(start, rec))
            .add(rec);
    }

    buckets.into_values().map(BucketAgg::finish).collect()
}
