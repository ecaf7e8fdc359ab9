//! Request descriptors: index page queries and fetch requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query string of one static-report index request.
///
/// Each page request carries its own value; nothing about pagination is stored
/// on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexQuery {
    /// Report group identifier.
    #[serde(rename = "DPuG_ID")]
    pub dpug_id: String,
    /// Field the index is sorted by.
    pub sort_by: String,
    /// Sort direction.
    pub order_by: String,
    /// `"0"` to include delayed publications.
    #[serde(rename = "ExcludeDelayedPublication")]
    pub exclude_delayed_publication: String,
    /// 1-based page number.
    pub page: u32,
}

impl Default for IndexQuery {
    fn default() -> Self {
        Self {
            dpug_id: "EA-001".to_string(),
            sort_by: "Date".to_string(),
            order_by: "DESC".to_string(),
            exclude_delayed_publication: "0".to_string(),
            page: 1,
        }
    }
}

impl IndexQuery {
    /// Copy of this query targeting `page`.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// Cadence of the returned records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Granularity {
    /// Native cadence of the published results.
    #[default]
    Hourly,
    /// One record per local calendar day.
    Daily,
    /// One record per local ISO week (Monday start).
    Weekly,
    /// One record per local calendar month.
    Monthly,
    /// One record per local calendar year.
    Yearly,
}

/// Parameters of a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Cadence of the returned records.
    pub granularity: Granularity,
    /// Drop records whose local date is after this day.
    pub end_date: Option<NaiveDate>,
}

impl FetchRequest {
    /// Request at the given granularity with no end date.
    #[must_use]
    pub const fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            end_date: None,
        }
    }

    /// Set the inclusive end date.
    #[must_use]
    pub const fn end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.end_date = end_date;
        self
    }
}
