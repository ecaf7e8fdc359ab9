//! semopx-core
//!
//! Core traits and algorithms shared across the semopx crates.
//!
//! - `connector`: the `ReportSource` trait implemented by HTTP and mock sources.
//! - `index`: walks the paginated static-report index into per-date document groups.
//! - `timeseries`: merges result documents into per-timestamp price records and
//!   resamples them to coarser calendar cadences.
//! - `time`: timezone and timestamp parsing.
//!
//! Async runtime (Tokio)
//! ---------------------
//! The index walker pauses between pages with `tokio::time::sleep`, so the walk
//! must run under a Tokio 1.x runtime with the time driver enabled.
//!
#![warn(missing_docs)]

/// The `ReportSource` connector trait.
pub mod connector;
/// Static-report index walking and date grouping.
pub mod index;
/// Timezone and timestamp parsing helpers.
pub mod time;
/// Merge and resampling utilities for price records.
pub mod timeseries;

pub use connector::ReportSource;
pub use index::{DocumentGroup, DocumentGroups, WalkOptions, walk_index};
pub use time::{format_local, parse_timestamp, parse_timezone};
pub use timeseries::merge::{MergeOptions, collect_prices, merge_document};
pub use timeseries::resample::{resample, retain_until};

pub use chrono_tz::Tz;
pub use semopx_types::*;
