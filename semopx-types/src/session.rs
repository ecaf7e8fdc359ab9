//! Market session types and their resource tags.

use serde::{Deserialize, Serialize};

/// A market clearing run that produces its own price per timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Day-ahead auction.
    DayAhead,
    /// First intraday auction.
    Ida1,
    /// Second intraday auction.
    Ida2,
    /// Third intraday auction.
    Ida3,
}

impl SessionKind {
    /// All session kinds in classification order.
    pub const ALL: [Self; 4] = [Self::DayAhead, Self::Ida1, Self::Ida2, Self::Ida3];

    /// Session kinds from highest to lowest priority when choosing a final price.
    pub const PRIORITY: [Self; 4] = [Self::Ida3, Self::Ida2, Self::Ida1, Self::DayAhead];

    /// Substring that identifies a resource of this session in the report index.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::DayAhead => "SEM-DA",
            Self::Ida1 => "SEM-IDA1",
            Self::Ida2 => "SEM-IDA2",
            Self::Ida3 => "SEM-IDA3",
        }
    }

    /// Full name of the rate field in the output record.
    #[must_use]
    pub const fn rate_field(self) -> &'static str {
        match self {
            Self::DayAhead => "da_kwh_rate",
            Self::Ida1 => "ida1_kwh_rate",
            Self::Ida2 => "ida2_kwh_rate",
            Self::Ida3 => "ida3_kwh_rate",
        }
    }

    /// Classify a resource identifier by substring match against the session tags.
    ///
    /// Returns `None` for resources that belong to no known session.
    #[must_use]
    pub fn classify(resource_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| resource_name.contains(kind.tag()))
    }
}
