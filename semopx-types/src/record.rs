//! Per-timestamp price records and the report envelope returned by a fetch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::SessionKind;

/// Prices for a single delivery timestamp, one optional rate per session.
///
/// Rates are per kWh in the configured currency. `final_kwh_rate` is derived by
/// [`PriceRecord::finalize`] and is `None` until then (or when no session
/// contributed a price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Unix timestamp (seconds) of the delivery period start.
    pub ts: i64,
    /// Localized `YYYY/MM/DD HH:MM:SS` rendering of `ts`.
    pub datetime: String,
    /// Market area code the prices apply to.
    pub market_area: String,
    /// Currency label of the rates.
    pub currency: String,
    /// Day-ahead rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub da_kwh_rate: Option<f64>,
    /// First intraday auction rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ida1_kwh_rate: Option<f64>,
    /// Second intraday auction rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ida2_kwh_rate: Option<f64>,
    /// Third intraday auction rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ida3_kwh_rate: Option<f64>,
    /// Highest-priority session rate present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_kwh_rate: Option<f64>,
}

impl PriceRecord {
    /// Create an empty record with no session rates.
    pub fn new(
        ts: i64,
        datetime: impl Into<String>,
        market_area: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            ts,
            datetime: datetime.into(),
            market_area: market_area.into(),
            currency: currency.into(),
            da_kwh_rate: None,
            ida1_kwh_rate: None,
            ida2_kwh_rate: None,
            ida3_kwh_rate: None,
            final_kwh_rate: None,
        }
    }

    /// Rate for the given session, if present.
    #[must_use]
    pub const fn rate(&self, kind: SessionKind) -> Option<f64> {
        match kind {
            SessionKind::DayAhead => self.da_kwh_rate,
            SessionKind::Ida1 => self.ida1_kwh_rate,
            SessionKind::Ida2 => self.ida2_kwh_rate,
            SessionKind::Ida3 => self.ida3_kwh_rate,
        }
    }

    /// Set (or overwrite) the rate for the given session.
    pub fn set_rate(&mut self, kind: SessionKind, value: f64) {
        let slot = match kind {
            SessionKind::DayAhead => &mut self.da_kwh_rate,
            SessionKind::Ida1 => &mut self.ida1_kwh_rate,
            SessionKind::Ida2 => &mut self.ida2_kwh_rate,
            SessionKind::Ida3 => &mut self.ida3_kwh_rate,
        };
        *slot = Some(value);
    }

    /// Session rates present on this record, in classification order.
    pub fn sessions(&self) -> impl Iterator<Item = (SessionKind, f64)> + '_ {
        SessionKind::ALL
            .into_iter()
            .filter_map(|kind| self.rate(kind).map(|v| (kind, v)))
    }

    /// Highest-priority session rate present (ida3 > ida2 > ida1 > da).
    #[must_use]
    pub fn best_rate(&self) -> Option<f64> {
        SessionKind::PRIORITY
            .into_iter()
            .find_map(|kind| self.rate(kind))
    }

    /// Recompute `final_kwh_rate` from the session rates and return it.
    pub fn finalize(&mut self) -> Option<f64> {
        self.final_kwh_rate = self.best_rate();
        self.final_kwh_rate
    }
}

/// Result of a fetch: records keyed by Unix timestamp.
///
/// Serializes as `{"areas": {"<ts>": {...}}}`; the `areas` key is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    /// Records keyed by their `ts`.
    #[serde(default)]
    pub areas: BTreeMap<i64, PriceRecord>,
}

impl PriceReport {
    /// Create an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            areas: BTreeMap::new(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// True if the report carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Record for a Unix timestamp.
    #[must_use]
    pub fn get(&self, ts: i64) -> Option<&PriceRecord> {
        self.areas.get(&ts)
    }

    /// Records in ascending timestamp order.
    pub fn records(&self) -> impl Iterator<Item = &PriceRecord> {
        self.areas.values()
    }

    /// Recompute `final_kwh_rate` on every record.
    pub fn finalize(&mut self) {
        for rec in self.areas.values_mut() {
            rec.finalize();
        }
    }
}

impl FromIterator<PriceRecord> for PriceReport {
    fn from_iter<I: IntoIterator<Item = PriceRecord>>(iter: I) -> Self {
        Self {
            areas: iter.into_iter().map(|r| (r.ts, r)).collect(),
        }
    }
}
