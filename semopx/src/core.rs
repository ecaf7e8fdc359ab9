use std::sync::Arc;
use std::time::Duration;

use semopx_core::{BackoffConfig, IndexQuery, ReportSource, SemopxConfig, SemopxError};
use semopx_http::HttpSource;

/// Client that walks the SEMOpx index and assembles per-kWh price reports.
pub struct Semopx {
    pub(crate) source: Arc<dyn ReportSource>,
    pub(crate) cfg: SemopxConfig,
}

impl Semopx {
    /// Start building a new `Semopx` client.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use semopx::{Semopx, HttpSource};
    ///
    /// let client = Semopx::builder()
    ///     .with_source(Arc::new(HttpSource::new_default()?))
    ///     .market_area("NI")
    ///     .timezone("Europe/London")
    ///     .build()?;
    /// let report = client.daily(None).await?;
    /// ```
    #[must_use]
    pub fn builder() -> SemopxBuilder {
        SemopxBuilder::new()
    }

    /// Client for the public API with default settings.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, SemopxError> {
        Self::builder()
            .with_source(Arc::new(HttpSource::new_default()?))
            .build()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SemopxConfig {
        &self.cfg
    }

    /// Name of the report source in use.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}

/// Builder for constructing a `Semopx` client with custom configuration.
pub struct SemopxBuilder {
    source: Option<Arc<dyn ReportSource>>,
    cfg: SemopxConfig,
}

impl Default for SemopxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SemopxBuilder {
    /// Create a builder with default settings and no source.
    ///
    /// Defaults: currency `euro`, market area `ROI`, timezone `Europe/Dublin`,
    /// `min_days` 5, a one second pause between index pages, and up to eight
    /// attempts with exponential backoff between 1s and 20s.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            cfg: SemopxConfig::default(),
        }
    }

    /// Set the report source.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ReportSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: SemopxConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Currency label stamped on every record.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.cfg.currency = currency.into();
        self
    }

    /// Market area code rows must carry (e.g. `ROI`, `NI`).
    #[must_use]
    pub fn market_area(mut self, market_area: impl Into<String>) -> Self {
        self.cfg.market_area = market_area.into();
        self
    }

    /// IANA timezone used for record datetimes and calendar buckets.
    ///
    /// The name is resolved when a fetch starts; an unknown name fails that
    /// fetch with `InvalidConfig` before any request is made.
    #[must_use]
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.cfg.timezone = timezone.into();
        self
    }

    /// Stop walking the index once more than `days` dates have been seen.
    #[must_use]
    pub const fn min_days(mut self, days: usize) -> Self {
        self.cfg.min_days = days;
        self
    }

    /// Pause before every index page request.
    #[must_use]
    pub const fn page_delay(mut self, delay: Duration) -> Self {
        self.cfg.page_delay = delay;
        self
    }

    /// Static index query parameters; the page number is ignored.
    #[must_use]
    pub fn index_query(mut self, query: IndexQuery) -> Self {
        self.cfg.index_query = query;
        self
    }

    /// Retry policy for transport and structural failures.
    #[must_use]
    pub const fn backoff(mut self, cfg: BackoffConfig) -> Self {
        self.cfg.backoff = cfg;
        self
    }

    /// Deadline for a whole fetch, retries included.
    ///
    /// When exceeded the fetch fails with `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// - `InvalidArg` if no source was set or the market area is empty.
    /// - `InvalidConfig` if the backoff policy is unusable.
    pub fn build(self) -> Result<Semopx, SemopxError> {
        let Some(source) = self.source else {
            return Err(SemopxError::InvalidArg(
                "no report source set; add one via with_source(...)".to_string(),
            ));
        };
        if self.cfg.market_area.trim().is_empty() {
            return Err(SemopxError::InvalidArg(
                "market area must not be empty".to_string(),
            ));
        }

        let b = &self.cfg.backoff;
        if b.max_attempts == 0 {
            return Err(SemopxError::InvalidConfig(
                "backoff.max_attempts must be at least 1".to_string(),
            ));
        }
        if b.min_backoff_ms > b.max_backoff_ms {
            return Err(SemopxError::InvalidConfig(format!(
                "backoff.min_backoff_ms ({}) exceeds max_backoff_ms ({})",
                b.min_backoff_ms, b.max_backoff_ms
            )));
        }
        if b.jitter_percent > 100 {
            return Err(SemopxError::InvalidConfig(format!(
                "backoff.jitter_percent must be within 0..=100, got {}",
                b.jitter_percent
            )));
        }

        Ok(Semopx {
            source,
            cfg: self.cfg,
        })
    }
}
