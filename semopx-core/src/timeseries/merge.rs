use std::collections::HashMap;

use chrono_tz::Tz;

use crate::time::{format_local, parse_timestamp};
use crate::{DocumentGroups, ReportSource};
use semopx_types::{PriceRecord, PriceReport, ResultDocument, SemopxError, SessionKind};

/// Source prices are per MWh; records carry per-kWh rates.
const KWH_PER_MWH: f64 = 1000.0;

/// Settings that shape merged records.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Only rows whose area descriptor contains this code contribute.
    pub market_area: String,
    /// Currency label stamped on new records.
    pub currency: String,
    /// Timezone used to render record datetimes.
    pub tz: Tz,
}

/// Merge the rows of one result document into `report` under `kind`.
///
/// For every row of the configured market area, timestamps and prices are
/// paired by position and written as `price / 1000` into the record for that
/// timestamp, creating the record on first sight. An existing rate for the same
/// session is overwritten, so merging the same document twice is a no-op.
/// `final_kwh_rate` is not touched; call [`PriceReport::finalize`] afterwards.
///
/// Returns the number of rates written.
///
/// # Errors
/// - `Structure` if a row is malformed or its timestamp and price lists differ
///   in length. Nothing from that row is written.
/// - `Data` if a timestamp cannot be parsed.
pub fn merge_document(
    report: &mut PriceReport,
    kind: SessionKind,
    document: &ResultDocument,
    opts: &MergeOptions,
) -> Result<usize, SemopxError> {
    let mut written = 0;
    for row in &document.rows {
        if !row.matches_area(&opts.market_area)? {
            continue;
        }

        let stamps = row.timestamps()?;
        let prices = row.prices()?;
        if stamps.len() != prices.len() {
            return Err(SemopxError::structure(format!(
                "result row has {} timestamps but {} prices",
                stamps.len(),
                prices.len()
            )));
        }
        let keys = stamps
            .into_iter()
            .map(|raw| parse_timestamp(raw, opts.tz))
            .collect::<Result<Vec<_>, _>>()?;

        for ((ts, local), price) in keys.into_iter().zip(prices) {
            report
                .areas
                .entry(ts)
                .or_insert_with(|| {
                    PriceRecord::new(
                        ts,
                        format_local(&local),
                        opts.market_area.as_str(),
                        opts.currency.as_str(),
                    )
                })
                .set_rate(kind, price / KWH_PER_MWH);
            written += 1;
        }
    }
    Ok(written)
}

/// Download every grouped resource and merge it into a finalized report.
///
/// Resources are visited group by group in index order. A resource listed under
/// several dates is fetched once, at its last position, so later writes still
/// win exactly as if every listing were fetched and merged. Resources matching no session tag are skipped
/// without a request; resources answering without content are logged and
/// skipped. The report is finalized before it is returned.
///
/// # Errors
/// Propagates source errors and the errors of [`merge_document`].
pub async fn collect_prices(
    source: &dyn ReportSource,
    groups: &DocumentGroups,
    opts: &MergeOptions,
) -> Result<PriceReport, SemopxError> {
    let mut report = PriceReport::new();
    let mut last_seen: HashMap<&str, usize> = HashMap::new();
    for (pos, resource) in groups.resources().enumerate() {
        last_seen.insert(resource, pos);
    }

    for (pos, resource) in groups.resources().enumerate() {
        if last_seen.get(resource) != Some(&pos) {
            continue;
        }
        let Some(kind) = SessionKind::classify(resource) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(resource, "skipping resource with no session tag");
            continue;
        };
        let Some(document) = source.document(resource).await? else {
            #[cfg(feature = "tracing")]
            tracing::error!(
                source = source.name(),
                resource,
                "failed to fetch data for resource"
            );
            continue;
        };

        let written = merge_document(&mut report, kind, &document, opts)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(resource, session = ?kind, written, "merged result document");
        #[cfg(not(feature = "tracing"))]
        let _ = written;
    }

    report.finalize();

    #[cfg(feature = "tracing")]
    tracing::debug!(records = report.len(), "merged price report");

    Ok(report)
}
