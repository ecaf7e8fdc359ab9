//! Semopx fetches SEMOpx electricity market results as per-kWh price records.
//!
//! Overview
//! - Walks the paginated static-report index newest first, grouping published
//!   documents by date until enough days are covered.
//! - Downloads the day-ahead (`SEM-DA`) and intraday auction (`SEM-IDA1/2/3`)
//!   results, keeps the rows of one market area, and converts prices from per
//!   MWh to per kWh.
//! - Picks `final_kwh_rate` per timestamp from the most recent auction that
//!   priced it: IDA3, then IDA2, then IDA1, then day-ahead.
//! - Retries the whole walk on transport or structural failures with
//!   exponential, jittered backoff.
//! - Optionally drops records after an end date and resamples to daily, weekly,
//!   monthly or yearly means in the display timezone.
//!
//! Example
//! ```rust,ignore
//! use semopx::Semopx;
//!
//! let client = Semopx::new_default()?;
//! let report = client.fetch().await?;
//! for rec in report.records() {
//!     println!("{} {:?}", rec.datetime, rec.final_kwh_rate);
//! }
//! // Serializes as {"areas": {"<ts>": {...}}}
//! let json = serde_json::to_string(&report)?;
//! ```
//!
//! See `semopx/examples/` for a runnable demonstration.
#![warn(missing_docs)]

mod backoff;
pub(crate) mod core;
mod fetch;

pub use crate::core::{Semopx, SemopxBuilder};

pub use semopx_core::{
    BackoffConfig, ConnectorKey, FetchRequest, Granularity, IndexQuery, PriceRecord, PriceReport,
    ReportSource, SemopxConfig, SemopxError, SessionKind,
};
pub use semopx_http::{HttpSource, HttpSourceBuilder};
