use crate::archive::obfuscator;
use crate::archive::observation::Observation;
use crate::archive::store::ArchiveStore;
use crate::ingest::anomaly;
use crate::ingest::error::IngestError;
use crate::ingest::fetcher::ReportFetcher;
use crate::ingest::month_range::MonthRange;
use crate::ingest::parser;
use log::{info, warn};
use std::time::Duration;

/// Pause between month downloads so the batch never hammers the source.
const FETCH_DELAY: Duration = Duration::from_millis(100);

/// Outcome of one ingestion batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub months_fetched: usize,
    pub months_failed: usize,
    pub records_archived: usize,
    pub records_flagged: usize,
}

/// Drives the full fetch, parse, anomaly-annotate, scramble and archive
/// sequence for a range of months.
pub struct Ingestor {
    fetcher: ReportFetcher,
    store: ArchiveStore,
}

impl Ingestor {
    pub fn new(fetcher: ReportFetcher, store: ArchiveStore) -> Self {
        Self { fetcher, store }
    }

    /// Downloads every month in `range` and archives the combined batch.
    ///
    /// A failed month is logged and dropped; the batch carries on with the
    /// months that did arrive. Only an archive write failure aborts the run.
    pub async fn run(&self, range: MonthRange) -> Result<IngestSummary, IngestError> {
        let mut reports = Vec::new();
        let mut first = true;
        for (year, month) in range.months() {
            if !first {
                tokio::time::sleep(FETCH_DELAY).await;
            }
            first = false;
            let fetched = self.fetcher.fetch_month(year, month).await;
            reports.push((year, month, fetched));
        }
        self.ingest_reports(reports).await
    }

    /// Parses and archives a batch of already-fetched month reports.
    ///
    /// The archive is replaced wholesale: scrambled ordering and sequence ids
    /// are only stable within a single batch, so partial appends would leak
    /// the insertion order.
    pub async fn ingest_reports(
        &self,
        reports: Vec<(i32, u32, Result<String, IngestError>)>,
    ) -> Result<IngestSummary, IngestError> {
        let mut months_fetched = 0;
        let mut months_failed = 0;
        let mut observations: Vec<Observation> = Vec::new();

        for (year, month, fetched) in reports {
            match fetched {
                Ok(text) => {
                    let parsed = parser::parse_month(&text, year, month);
                    info!("Parsed {} observations for {}_{:02}", parsed.len(), year, month);
                    observations.extend(parsed);
                    months_fetched += 1;
                }
                Err(e) => {
                    warn!("Dropping month {}_{:02}: {}", year, month, e);
                    months_failed += 1;
                }
            }
        }

        anomaly::annotate_all(&mut observations);
        let records_flagged = observations.iter().filter(|o| o.is_flagged()).count();
        let records_archived = observations.len();

        let mut rng = obfuscator::scramble_rng();
        let records = obfuscator::scramble(observations, &mut rng);
        self.store.replace(records).await?;

        info!(
            "Ingestion complete: {} months fetched, {} failed, {} records archived ({} flagged)",
            months_fetched, months_failed, records_archived, records_flagged
        );
        Ok(IngestSummary {
            months_fetched,
            months_failed,
            records_archived,
            records_flagged,
        })
    }
}
