use chrono::NaiveDate;

use semopx_core::{
    FetchRequest, Granularity, MergeOptions, PriceReport, SemopxError, Tz, WalkOptions,
    collect_prices, parse_timezone, resample, retain_until, walk_index,
};

use crate::backoff::retry_delay;
use crate::core::Semopx;

impl Semopx {
    /// Fetch the latest prices at their native cadence.
    ///
    /// Equivalent to [`Semopx::fetch_with`] with the default request.
    ///
    /// # Errors
    /// See [`Semopx::fetch_with`].
    pub async fn fetch(&self) -> Result<PriceReport, SemopxError> {
        self.fetch_with(FetchRequest::default()).await
    }

    /// Walk the index, merge every session result, then shape the report.
    ///
    /// The walk and merge run as one attempt. An attempt failing with a
    /// transport or structural error is retried from page 1 after an
    /// exponential, jittered backoff, up to `backoff.max_attempts` attempts.
    /// Records after `end_date` are dropped and the rest resampled to the
    /// requested granularity.
    ///
    /// # Errors
    /// - `InvalidConfig` if the timezone is unknown; no request is made.
    /// - `RequestTimeout` if `request_timeout` elapses.
    /// - The last attempt's error once retries are spent, or the first
    ///   non-retryable error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "semopx::fetch",
            skip(self),
            fields(
                source = self.source.name(),
                market_area = %self.cfg.market_area,
            ),
        )
    )]
    pub async fn fetch_with(&self, req: FetchRequest) -> Result<PriceReport, SemopxError> {
        let tz = parse_timezone(&self.cfg.timezone)?;

        let mut report = match self.cfg.request_timeout {
            Some(deadline) => tokio::time::timeout(deadline, self.fetch_with_retry(tz))
                .await
                .unwrap_or_else(|_| Err(SemopxError::request_timeout("fetch"))),
            None => self.fetch_with_retry(tz).await,
        }?;

        if let Some(end_date) = req.end_date {
            retain_until(&mut report, end_date, tz);
        }
        Ok(resample(&report, req.granularity, tz))
    }

    /// Native-cadence records up to `end_date`.
    ///
    /// # Errors
    /// See [`Semopx::fetch_with`].
    pub async fn hourly(&self, end_date: Option<NaiveDate>) -> Result<PriceReport, SemopxError> {
        self.fetch_at(Granularity::Hourly, end_date).await
    }

    /// One record per local day up to `end_date`.
    ///
    /// # Errors
    /// See [`Semopx::fetch_with`].
    pub async fn daily(&self, end_date: Option<NaiveDate>) -> Result<PriceReport, SemopxError> {
        self.fetch_at(Granularity::Daily, end_date).await
    }

    /// One record per local week (Monday start) up to `end_date`.
    ///
    /// # Errors
    /// See [`Semopx::fetch_with`].
    pub async fn weekly(&self, end_date: Option<NaiveDate>) -> Result<PriceReport, SemopxError> {
        self.fetch_at(Granularity::Weekly, end_date).await
    }

    /// One record per local month up to `end_date`.
    ///
    /// # Errors
    /// See [`Semopx::fetch_with`].
    pub async fn monthly(&self, end_date: Option<NaiveDate>) -> Result<PriceReport, SemopxError> {
        self.fetch_at(Granularity::Monthly, end_date).await
    }

    /// One record per local year up to `end_date`.
    ///
    /// # Errors
    /// See [`Semopx::fetch_with`].
    pub async fn yearly(&self, end_date: Option<NaiveDate>) -> Result<PriceReport, SemopxError> {
        self.fetch_at(Granularity::Yearly, end_date).await
    }

    async fn fetch_at(
        &self,
        granularity: Granularity,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceReport, SemopxError> {
        self.fetch_with(FetchRequest::new(granularity).end_date(end_date))
            .await
    }

    async fn fetch_with_retry(&self, tz: Tz) -> Result<PriceReport, SemopxError> {
        let backoff = &self.cfg.backoff;
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.attempt(tz).await {
                Ok(report) => return Ok(report),
                Err(e) if e.is_retryable() && attempt < backoff.max_attempts => {
                    let delay = retry_delay(backoff, attempt - 1);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        attempt,
                        max_attempts = backoff.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "fetch attempt failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(attempt, error = %e, "fetch failed");
                    return Err(e);
                }
            }
        }
    }

    async fn attempt(&self, tz: Tz) -> Result<PriceReport, SemopxError> {
        let walk = WalkOptions {
            query: self.cfg.index_query.clone(),
            min_days: self.cfg.min_days,
            page_delay: self.cfg.page_delay,
        };
        let groups = walk_index(self.source.as_ref(), &walk).await?;

        let merge = MergeOptions {
            market_area: self.cfg.market_area.clone(),
            currency: self.cfg.currency.clone(),
            tz,
        };
        collect_prices(self.source.as_ref(), &groups, &merge).await
    }
}
