//! Provides the `IngestClient` for downloading and archiving monthly reports.
//!
//! Obtained via [`Clime::ingest()`], this client drives the full pipeline:
//! fetch, parse, anomaly-annotate, scramble and archive.

use crate::clime::Clime;
use crate::error::ClimeError;
use crate::ingest::error::IngestError;
use crate::ingest::fetcher::ReportFetcher;
use crate::ingest::month_range::MonthRange;
use crate::ingest::pipeline::{IngestSummary, Ingestor};
use bon::bon;

/// A client for running ingestion batches.
///
/// Instances are created by calling [`Clime::ingest()`].
pub struct IngestClient<'a> {
    client: &'a Clime,
}

#[bon]
impl<'a> IngestClient<'a> {
    pub(crate) fn new(client: &'a Clime) -> Self {
        Self { client }
    }

    /// Downloads every month in the range and replaces the archive with the
    /// combined batch.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.range(MonthRange)`: Optional. The months to fetch. Defaults to the
    ///   full published history, September 2005 through June 2025.
    ///
    /// # Errors
    ///
    /// Individual failed months are logged and dropped, never surfaced here;
    /// only a failure to write the archive aborts the run.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clime::{Clime, ClimeError, MonthRange};
    /// # async fn run() -> Result<(), ClimeError> {
    /// let client = Clime::builder().secret("super_secret_123").build().await?;
    /// let summary = client
    ///     .ingest()
    ///     .run()
    ///     .range(MonthRange::new(2010, 1, 2010, 12).unwrap())
    ///     .call()
    ///     .await?;
    /// println!("archived {} records", summary.records_archived);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn run(&self, range: Option<MonthRange>) -> Result<IngestSummary, ClimeError> {
        let range = range.unwrap_or_else(MonthRange::default_historical);
        let summary = self.ingestor().run(range).await?;
        Ok(summary)
    }

    /// Archives a batch of already-fetched month reports, bypassing the
    /// network entirely. Useful when reports arrive through another channel.
    pub async fn ingest_reports(
        &self,
        reports: Vec<(i32, u32, Result<String, IngestError>)>,
    ) -> Result<IngestSummary, ClimeError> {
        let summary = self.ingestor().ingest_reports(reports).await?;
        Ok(summary)
    }

    fn ingestor(&self) -> Ingestor {
        Ingestor::new(
            ReportFetcher::new(self.client.base_url()),
            self.client.store().clone(),
        )
    }
}
