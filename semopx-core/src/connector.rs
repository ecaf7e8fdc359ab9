use async_trait::async_trait;

use semopx_types::{IndexPage, IndexQuery, ResultDocument, SemopxError};

/// A source of static-report index pages and result documents.
///
/// `Ok(None)` means the source answered without content (HTTP 204). Callers
/// decide whether that is an error: an empty index page is, an empty result
/// document is skipped.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Stable name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Fetch one page of the static-report index.
    async fn index_page(&self, query: &IndexQuery) -> Result<Option<IndexPage>, SemopxError>;

    /// Fetch the result document published under `resource_name`.
    async fn document(&self, resource_name: &str) -> Result<Option<ResultDocument>, SemopxError>;
}
