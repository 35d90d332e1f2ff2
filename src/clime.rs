//! The main entry point for working with the archived weather data: ingesting
//! monthly reports, retrieving scrambled observations and computing rainfall
//! statistics.

use crate::archive::store::ArchiveStore;
use crate::clients::ingest_client::IngestClient;
use crate::clients::observations_client::ObservationsClient;
use crate::clients::rainfall_client::RainfallClient;
use crate::clients::statistics_client::StatisticsClient;
use crate::error::ClimeError;
use crate::rainfall::source::{CsvRainfallSource, DataSourceKind, RainfallCatalog};
use crate::retrieval::service::RetrievalService;
use crate::utils::{ensure_data_dir_exists, get_data_dir};
use bon::bon;
use std::path::PathBuf;

/// Default endpoint publishing the monthly summary reports.
pub const DEFAULT_BASE_URL: &str = "https://xyzxyzxyzxyz.com";

const STORE_FILE: &str = "scrambled_weather_data.csv";
const LEGACY_RAINFALL_FILE: &str = "monthly-rains.csv";
const STATION_RAINFALL_FILE: &str = "station-rainfall-2000-2025.csv";

/// The main client for the weather archive.
///
/// Owns the scrambled observation store, the secret that gates retrieval and
/// the rainfall dataset catalog. Per-concern clients are obtained from it:
/// [`Clime::ingest()`], [`Clime::observations()`], [`Clime::statistics()`] and
/// [`Clime::rainfall()`].
///
/// # Examples
///
/// ```no_run
/// # use clime::{Clime, ClimeError};
/// # async fn run() -> Result<(), ClimeError> {
/// let client = Clime::builder()
///     .secret("super_secret_123")
///     .build()
///     .await?;
/// let summary = client.observations().summary().secret("super_secret_123").call().await?;
/// println!("{} records archived", summary.total_records);
/// # Ok(())
/// # }
/// ```
pub struct Clime {
    data_dir: PathBuf,
    base_url: String,
    store: ArchiveStore,
    retrieval: RetrievalService,
    rainfall: RainfallCatalog,
}

#[bon]
impl Clime {
    /// Creates a client.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.secret(String)`: **Required.** The unscramble secret that retrieval
    ///   calls will be checked against.
    /// * `.data_dir(PathBuf)`: Optional. Where the archive store lives.
    ///   Defaults to a `clime_data` directory under the platform data dir,
    ///   created if absent.
    /// * `.base_url(String)`: Optional. The report endpoint, defaulting to
    ///   [`DEFAULT_BASE_URL`].
    /// * `.legacy_rainfall_csv(PathBuf)` / `.station_rainfall_csv(PathBuf)`:
    ///   Optional. Paths to the two rainfall datasets; both default to files
    ///   inside the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`ClimeError::DataDirResolution`] when no platform data
    /// directory can be determined, or [`ClimeError::DataDirCreation`] when
    /// the directory cannot be created.
    #[builder]
    pub async fn new(
        #[builder(into)] secret: String,
        data_dir: Option<PathBuf>,
        #[builder(into)] base_url: Option<String>,
        legacy_rainfall_csv: Option<PathBuf>,
        station_rainfall_csv: Option<PathBuf>,
    ) -> Result<Self, ClimeError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => get_data_dir()?,
        };
        ensure_data_dir_exists(&data_dir).await?;

        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let store = ArchiveStore::new(data_dir.join(STORE_FILE));
        let retrieval = RetrievalService::new(store.clone(), secret);

        let legacy = CsvRainfallSource::new(
            legacy_rainfall_csv.unwrap_or_else(|| data_dir.join(LEGACY_RAINFALL_FILE)),
            "long-run gauge records (1901-2021)",
        );
        let station = CsvRainfallSource::new(
            station_rainfall_csv.unwrap_or_else(|| data_dir.join(STATION_RAINFALL_FILE)),
            "station records (2000-2025)",
        );

        Ok(Self {
            data_dir,
            base_url,
            store,
            retrieval,
            rainfall: RainfallCatalog::new(legacy, station),
        })
    }

    /// Client for fetching, parsing and archiving monthly reports.
    pub fn ingest(&self) -> IngestClient<'_> {
        IngestClient::new(self)
    }

    /// Client for secret-gated retrieval of archived observations.
    pub fn observations(&self) -> ObservationsClient<'_> {
        ObservationsClient::new(self)
    }

    /// Client for rainy-day and rainfall statistics over the archive.
    pub fn statistics(&self) -> StatisticsClient<'_> {
        StatisticsClient::new(self)
    }

    /// Client for the bundled annual rainfall datasets.
    pub fn rainfall(&self) -> RainfallClient<'_> {
        RainfallClient::new(self)
    }

    /// Switches which rainfall dataset subsequent queries read from.
    pub fn set_rainfall_source(&self, kind: DataSourceKind) {
        self.rainfall_catalog().select(kind);
    }

    /// The currently selected rainfall dataset.
    pub fn rainfall_source(&self) -> DataSourceKind {
        self.rainfall_catalog().selected()
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn store(&self) -> &ArchiveStore {
        &self.store
    }

    pub(crate) fn retrieval(&self) -> &RetrievalService {
        &self.retrieval
    }

    pub(crate) fn rainfall_catalog(&self) -> &RainfallCatalog {
        &self.rainfall
    }
}
