//! Provides the `ObservationsClient` for secret-gated retrieval of archived
//! observations, obtained via [`Clime::observations()`].

use crate::archive::observation::Observation;
use crate::clime::Clime;
use crate::error::ClimeError;
use crate::retrieval::service::ArchiveSummary;
use bon::bon;

/// A client for reading back the scrambled archive.
///
/// Every method takes the unscramble secret; a wrong secret yields
/// [`RetrievalError::AccessDenied`](crate::RetrievalError::AccessDenied)
/// before any store access happens.
pub struct ObservationsClient<'a> {
    client: &'a Clime,
}

#[bon]
impl<'a> ObservationsClient<'a> {
    pub(crate) fn new(client: &'a Clime) -> Self {
        Self { client }
    }

    /// Retrieves the observations for one calendar month, in day order.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.year(i32)`: **Required.**
    /// * `.month(u32)`: **Required.** 1-based calendar month.
    /// * `.secret(&str)`: **Required.** The unscramble secret.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clime::{Clime, ClimeError};
    /// # async fn run() -> Result<(), ClimeError> {
    /// let client = Clime::builder().secret("super_secret_123").build().await?;
    /// let january = client
    ///     .observations()
    ///     .month()
    ///     .year(2010)
    ///     .month(1)
    ///     .secret("super_secret_123")
    ///     .call()
    ///     .await?;
    /// println!("{} observations in January 2010", january.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn month(
        &self,
        year: i32,
        month: u32,
        secret: &str,
    ) -> Result<Vec<Observation>, ClimeError> {
        let observations = self.client.retrieval().observations(year, month, secret).await?;
        Ok(observations)
    }

    /// Retrieves the entire archive in chronological order.
    #[builder]
    pub async fn all(&self, secret: &str) -> Result<Vec<Observation>, ClimeError> {
        let observations = self.client.retrieval().all_observations(secret).await?;
        Ok(observations)
    }

    /// Summarizes the archive: totals, flagged count and per-year breakdown.
    #[builder]
    pub async fn summary(&self, secret: &str) -> Result<ArchiveSummary, ClimeError> {
        let summary = self.client.retrieval().summary(secret).await?;
        Ok(summary)
    }
}
