use std::time::Duration;

use reqwest::Client;
use url::Url;

use semopx_core::SemopxError;

use crate::HttpSource;

const DEFAULT_USER_AGENT: &str = concat!("semopx/", env!("CARGO_PKG_VERSION"));

/// Builder for [`HttpSource`].
///
/// Endpoints default to the public SEMOpx API. A custom `reqwest::Client`
/// takes precedence over `timeout` and `user_agent`, which only shape the
/// client built here.
#[derive(Debug, Clone)]
pub struct HttpSourceBuilder {
    index_url: String,
    documents_url: String,
    client: Option<Client>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for HttpSourceBuilder {
    fn default() -> Self {
        Self {
            index_url: HttpSource::DEFAULT_INDEX_URL.to_string(),
            documents_url: HttpSource::DEFAULT_DOCUMENTS_URL.to_string(),
            client: None,
            timeout: Some(Duration::from_secs(30)),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpSourceBuilder {
    /// Override the static-report index endpoint.
    #[must_use]
    pub fn index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into();
        self
    }

    /// Override the base endpoint documents are fetched from.
    #[must_use]
    pub fn documents_url(mut self, url: impl Into<String>) -> Self {
        self.documents_url = url.into();
        self
    }

    /// Point both endpoints at `base` (`{base}/documents/static-reports` and
    /// `{base}/documents`). Mostly useful against a local mock server.
    #[must_use]
    pub fn base_url(self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.index_url(format!("{base}/documents/static-reports"))
            .documents_url(format!("{base}/documents"))
    }

    /// Use a preconfigured HTTP client.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Per-request timeout of the built client; `None` disables it.
    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// User agent of the built client.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn parse_endpoint(what: &str, raw: &str) -> Result<Url, SemopxError> {
        let url = Url::parse(raw)
            .map_err(|e| SemopxError::InvalidConfig(format!("{what} url {raw:?}: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SemopxError::InvalidConfig(format!(
                "{what} url {raw:?}: unsupported scheme {other}"
            ))),
        }
    }

    /// Validate the endpoints and build the source.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if an endpoint is not an absolute http(s) URL or
    /// the HTTP client cannot be constructed.
    pub fn build(self) -> Result<HttpSource, SemopxError> {
        let index_url = Self::parse_endpoint("index", &self.index_url)?;
        let documents_url = Self::parse_endpoint("documents", &self.documents_url)?;

        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder().user_agent(self.user_agent);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(|e| {
                    SemopxError::InvalidConfig(format!("failed to build HTTP client: {e}"))
                })?
            }
        };

        Ok(HttpSource {
            client,
            index_url,
            documents_url,
        })
    }
}
