use crate::archive::observation::Observation;
use crate::archive::store::ArchiveStore;
use crate::retrieval::error::RetrievalError;
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate view of the archive contents, available to authorized callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    pub total_records: usize,
    pub flagged_records: usize,
    pub records_per_year: BTreeMap<i32, usize>,
}

/// Secret-gated access to the scrambled archive.
///
/// Retrieval restores chronological order within the requested scope; the
/// scrambling only ever hides ordering from direct readers of the store file.
/// Every call re-reads the store so a freshly ingested batch is visible
/// immediately.
#[derive(Debug, Clone)]
pub struct RetrievalService {
    store: ArchiveStore,
    secret: String,
}

impl RetrievalService {
    pub fn new(store: ArchiveStore, secret: String) -> Self {
        Self { store, secret }
    }

    /// Checks the caller's secret. This runs before any store I/O so an
    /// unauthorized caller learns nothing, not even whether the store exists.
    fn authorize(&self, secret: &str) -> Result<(), RetrievalError> {
        if secret != self.secret {
            warn!("Rejected retrieval attempt with invalid secret");
            return Err(RetrievalError::AccessDenied);
        }
        Ok(())
    }

    /// Returns the observations for one calendar month, sorted ascending by
    /// day of month.
    pub async fn observations(
        &self,
        year: i32,
        month: u32,
        secret: &str,
    ) -> Result<Vec<Observation>, RetrievalError> {
        self.authorize(secret)?;
        let records = self.store.load().await?;
        let mut observations: Vec<Observation> = records
            .into_iter()
            .map(|r| r.observation)
            .filter(|o| o.year_number() == Some(year) && o.month_number() == Some(month))
            .collect();
        observations.sort_by_key(|o| o.day_number());
        debug!(
            "Retrieved {} observations for {}_{:02}",
            observations.len(),
            year,
            month
        );
        Ok(observations)
    }

    /// Returns every archived observation, sorted by year, month and day.
    pub async fn all_observations(&self, secret: &str) -> Result<Vec<Observation>, RetrievalError> {
        self.authorize(secret)?;
        let records = self.store.load().await?;
        let mut observations: Vec<Observation> =
            records.into_iter().map(|r| r.observation).collect();
        observations.sort_by_key(|o| {
            (
                o.year_number().unwrap_or(i32::MIN),
                o.month_number().unwrap_or(0),
                o.day_number(),
            )
        });
        Ok(observations)
    }

    /// Summarizes the archive: totals, flagged count and a per-year breakdown.
    /// Records whose year field does not parse are counted in the totals but
    /// left out of the per-year map.
    pub async fn summary(&self, secret: &str) -> Result<ArchiveSummary, RetrievalError> {
        self.authorize(secret)?;
        let records = self.store.load().await?;

        let mut records_per_year: BTreeMap<i32, usize> = BTreeMap::new();
        let mut flagged_records = 0;
        for record in &records {
            if record.observation.is_flagged() {
                flagged_records += 1;
            }
            if let Some(year) = record.observation.year_number() {
                *records_per_year.entry(year).or_insert(0) += 1;
            }
        }

        Ok(ArchiveSummary {
            total_records: records.len(),
            flagged_records,
            records_per_year,
        })
    }
}
