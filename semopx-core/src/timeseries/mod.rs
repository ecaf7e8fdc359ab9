//! Price record utilities shared by the orchestrator and tests.
//!
//! Modules include:
//! - `merge`: fold result documents into per-timestamp records and finalize them
//! - `resample`: aggregate records into calendar buckets and trim by end date
/// Merge utilities for result documents.
pub mod merge;
/// Calendar resampling and end-date trimming.
pub mod resample;
