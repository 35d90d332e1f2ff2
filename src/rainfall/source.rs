use crate::rainfall::error::RainfallDataError;
use crate::rainfall::record::RainfallRecord;
use crate::stats::coerce::rain_amount;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tokio::task;

/// Reads rainfall records from a `Year,Jan,...,Dec,Total` CSV file. Both
/// bundled datasets share this format, so one loader type serves them all.
///
/// Rows with an unparseable year are skipped with a warning. Monthly cells
/// coerce like rain readings do elsewhere, so placeholders count as zero. The
/// trailing annual total is used when it parses and recomputed otherwise.
#[derive(Debug, Clone)]
pub struct CsvRainfallSource {
    path: PathBuf,
    label: String,
}

impl CsvRainfallSource {
    pub fn new(path: PathBuf, label: impl Into<String>) -> Self {
        Self { path, label: label.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Human-readable name used in logs and summaries.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Loads the full file. Synchronous; callers that need it off the async
    /// runtime go through [`RainfallCatalog`].
    pub fn load(&self) -> Result<Vec<RainfallRecord>, RainfallDataError> {
        let file = std::fs::File::open(&self.path)
            .map_err(|e| RainfallDataError::Open(self.path.clone(), e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| RainfallDataError::Read(self.path.clone(), e))?;
            let Some(year) = row.get(0).and_then(|y| y.trim().parse::<i32>().ok()) else {
                warn!(
                    "Skipping rainfall row with unparseable year {:?} in {:?}",
                    row.get(0).unwrap_or(""),
                    self.path
                );
                continue;
            };

            let mut monthly = [0.0; 12];
            for (i, cell) in monthly.iter_mut().enumerate() {
                *cell = rain_amount(row.get(i + 1).unwrap_or(""));
            }
            let source_total = row.get(13).and_then(|t| t.trim().parse::<f64>().ok());
            records.push(RainfallRecord::new(year, monthly, source_total));
        }

        if records.is_empty() {
            return Err(RainfallDataError::Empty(self.path.clone()));
        }
        debug!(
            "Loaded {} rainfall records from {} ({:?})",
            records.len(),
            self.label,
            self.path
        );
        Ok(records)
    }
}

/// Which of the two bundled rainfall datasets is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSourceKind {
    /// Long-run gauge records, 1901 through 2021.
    #[default]
    Legacy,
    /// Modern station records, 2000 through 2025.
    Station,
}

/// Holds both rainfall datasets and a runtime-switchable selection of which
/// one queries read from.
#[derive(Debug)]
pub struct RainfallCatalog {
    legacy: CsvRainfallSource,
    station: CsvRainfallSource,
    selected: RwLock<DataSourceKind>,
}

impl RainfallCatalog {
    pub fn new(legacy: CsvRainfallSource, station: CsvRainfallSource) -> Self {
        Self {
            legacy,
            station,
            selected: RwLock::new(DataSourceKind::default()),
        }
    }

    pub fn select(&self, kind: DataSourceKind) {
        *self.selected.write().unwrap() = kind;
        debug!("Rainfall source switched to {:?}", kind);
    }

    pub fn selected(&self) -> DataSourceKind {
        *self.selected.read().unwrap()
    }

    pub fn label(&self) -> &str {
        match self.selected() {
            DataSourceKind::Legacy => self.legacy.label(),
            DataSourceKind::Station => self.station.label(),
        }
    }

    /// Loads the currently selected dataset, sorted ascending by year.
    /// Blocking file work runs on the blocking thread pool.
    pub async fn records(&self) -> Result<Vec<RainfallRecord>, RainfallDataError> {
        let source = match self.selected() {
            DataSourceKind::Legacy => self.legacy.clone(),
            DataSourceKind::Station => self.station.clone(),
        };
        let mut records = task::spawn_blocking(move || source.load()).await??;
        records.sort_by_key(|r| r.year);
        Ok(records)
    }
}
