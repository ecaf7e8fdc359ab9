//! semopx-http
//!
//! Report source that implements `ReportSource` on top of the public SEMOpx
//! REST API: the paginated static-report index and the per-resource document
//! endpoint.
//!
//! Status mapping
//! --------------
//! - `204 No Content` answers `Ok(None)`.
//! - Any other non-success status, and any failure to send or read the
//!   request, is a `Transport` error.
//! - A body that does not decode into the expected shape is a `Structure` error.
#![warn(missing_docs)]

mod builder;

pub use builder::HttpSourceBuilder;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use semopx_core::{
    ConnectorKey, IndexPage, IndexQuery, ReportSource, ResultDocument, SemopxError,
};

/// Report source backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    index_url: Url,
    documents_url: Url,
}

impl HttpSource {
    /// Static connector key used in logs and errors.
    pub const KEY: ConnectorKey = ConnectorKey::new("semopx-http");

    /// Endpoint listing published static reports.
    pub const DEFAULT_INDEX_URL: &'static str =
        "https://reports.semopx.com/api/v1/documents/static-reports";

    /// Base endpoint of individual documents; the resource name is appended.
    pub const DEFAULT_DOCUMENTS_URL: &'static str = "https://reports.semopx.com/api/v1/documents";

    /// Start building a source with the public endpoints.
    #[must_use]
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::default()
    }

    /// Source for the public endpoints with a default HTTP client.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, SemopxError> {
        Self::builder().build()
    }

    /// Index endpoint this source queries.
    #[must_use]
    pub const fn index_url(&self) -> &Url {
        &self.index_url
    }

    /// Base endpoint documents are fetched from.
    #[must_use]
    pub const fn documents_url(&self) -> &Url {
        &self.documents_url
    }

    /// Full URL of a document.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the resource name is empty.
    pub fn document_url(&self, resource_name: &str) -> Result<Url, SemopxError> {
        if resource_name.is_empty() {
            return Err(SemopxError::InvalidArg(
                "resource name must not be empty".into(),
            ));
        }
        let mut url = self.documents_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                SemopxError::InvalidConfig(format!(
                    "documents url cannot take a path: {}",
                    self.documents_url
                ))
            })?
            .pop_if_empty()
            .push(resource_name);
        Ok(url)
    }

    fn transport(msg: impl Into<String>) -> SemopxError {
        SemopxError::transport(Self::KEY.as_str(), msg)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<Option<T>, SemopxError> {
        let response = request
            .send()
            .await
            .map_err(|e| Self::transport(format!("{what}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            #[cfg(feature = "tracing")]
            tracing::debug!(what, "no content");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::transport(format!("{what}: HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::transport(format!("{what}: reading body: {e}")))?;
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| SemopxError::structure(format!("{what}: {e}")))
    }
}

#[async_trait]
impl ReportSource for HttpSource {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "semopx_http::index_page",
            skip(self, query),
            fields(page = query.page),
        )
    )]
    async fn index_page(&self, query: &IndexQuery) -> Result<Option<IndexPage>, SemopxError> {
        let request = self.client.get(self.index_url.clone()).query(query);
        self.get_json(request, &format!("index page {}", query.page))
            .await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "semopx_http::document", skip(self))
    )]
    async fn document(&self, resource_name: &str) -> Result<Option<ResultDocument>, SemopxError> {
        let url = self.document_url(resource_name)?;
        self.get_json(self.client.get(url), resource_name).await
    }
}
