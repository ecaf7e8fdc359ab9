//! Mock report sources for CI-safe tests and examples.
//!
//! - [`MockSource`] serves a fixed index of seven publication dates with
//!   deterministic prices (see [`fixtures`]).
//! - [`DynamicMockSource`] is scripted at runtime through a
//!   [`DynamicMockController`] and records every request it receives.
use async_trait::async_trait;
use semopx_core::{IndexPage, IndexQuery, ReportSource, ResultDocument, SemopxError};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};

/// Mock source serving static fixtures.
///
/// The resource names `FAIL` and `EMPTY` force a transport error and a
/// no-content answer respectively, so failure paths can be exercised with the
/// fixture index.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource;

impl MockSource {
    /// Create the fixture source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportSource for MockSource {
    fn name(&self) -> &'static str {
        "semopx-mock"
    }

    async fn index_page(&self, query: &IndexQuery) -> Result<Option<IndexPage>, SemopxError> {
        Ok(fixtures::index_page(query.page))
    }

    async fn document(&self, resource_name: &str) -> Result<Option<ResultDocument>, SemopxError> {
        match resource_name {
            "FAIL" => Err(SemopxError::transport(
                "semopx-mock",
                "forced failure: document",
            )),
            "EMPTY" => Ok(None),
            other => Ok(fixtures::document(other)),
        }
    }
}
