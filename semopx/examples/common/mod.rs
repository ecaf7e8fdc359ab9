use semopx::{HttpSource, ReportSource};
use std::sync::Arc;

/// Live HTTP source, or the fixture mock when `SEMOPX_EXAMPLES_USE_MOCK` is set.
///
/// # Panics
/// Panics if the HTTP client cannot be constructed.
#[must_use]
pub fn get_source() -> Arc<dyn ReportSource> {
    if std::env::var("SEMOPX_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Source for CI) ---");
        Arc::new(semopx_mock::MockSource::new())
    } else {
        Arc::new(HttpSource::new_default().expect("HTTP client should build"))
    }
}
