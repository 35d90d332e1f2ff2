use crate::archive::error::ArchiveError;
use crate::archive::observation::{ArchivedRecord, Observation};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::task;

/// Column layout of the archival store file. One fixed header row, one data
/// row per observation, identifier first.
pub const STORE_HEADER: [&str; 20] = [
    "id",
    "year",
    "month",
    "day",
    "meanTemp",
    "highTemp",
    "highTime",
    "lowTemp",
    "lowTime",
    "heatDegDays",
    "coolDegDays",
    "rain",
    "windAvg",
    "windHi",
    "windHiTime",
    "domDir",
    "meanBarom",
    "meanHum",
    "flagged",
    "anomalyNote",
];

/// The durable, order-obfuscated observation store.
///
/// Writes are whole-file replacements through a temp-file-then-rename pass, so
/// concurrent readers observe either the previous complete store or the new
/// complete store, never a mix. Reads always go back to disk; there is no
/// caching layer.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    path: PathBuf,
}

impl ArchiveStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replaces the entire store with `records`. Blocking CSV work
    /// runs on the blocking thread pool.
    pub async fn replace(&self, records: Vec<ArchivedRecord>) -> Result<(), ArchiveError> {
        let path = self.path.clone();
        let count = records.len();
        task::spawn_blocking(move || write_store(&path, &records)).await??;
        info!("Archived {} records to {:?}", count, self.path);
        Ok(())
    }

    /// Reads the full store back. Rows with the wrong column count are
    /// skipped, not surfaced as errors; a damaged row must never take the
    /// whole read path down.
    pub async fn load(&self) -> Result<Vec<ArchivedRecord>, ArchiveError> {
        let path = self.path.clone();
        let records = task::spawn_blocking(move || read_store(&path)).await??;
        debug!("Loaded {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

fn write_store(path: &Path, records: &[ArchivedRecord]) -> Result<(), ArchiveError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir)
        .map_err(|e| ArchiveError::TempFileCreation(path.to_path_buf(), e))?;

    let mut writer = csv::Writer::from_writer(tmp.as_file());
    writer
        .write_record(STORE_HEADER)
        .map_err(|e| ArchiveError::StoreWrite(path.to_path_buf(), e))?;
    for record in records {
        writer
            .write_record(record_row(record))
            .map_err(|e| ArchiveError::StoreWrite(path.to_path_buf(), e))?;
    }
    writer
        .flush()
        .map_err(|e| ArchiveError::StoreWrite(path.to_path_buf(), csv::Error::from(e)))?;
    drop(writer);

    tmp.persist(path)
        .map_err(|e| ArchiveError::StoreReplace(path.to_path_buf(), e))?;
    Ok(())
}

fn read_store(path: &Path) -> Result<Vec<ArchivedRecord>, ArchiveError> {
    let file = std::fs::File::open(path)
        .map_err(|e| ArchiveError::StoreOpen(path.to_path_buf(), e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ArchiveError::StoreRead(path.to_path_buf(), e))?;
        match record_from_row(&row) {
            Some(record) => records.push(record),
            None => warn!(
                "Skipping malformed store row with {} fields in {:?}",
                row.len(),
                path
            ),
        }
    }
    Ok(records)
}

fn record_row(record: &ArchivedRecord) -> [&str; 20] {
    let o = &record.observation;
    [
        &record.id,
        &o.year,
        &o.month,
        &o.day,
        &o.mean_temp,
        &o.high_temp,
        &o.high_time,
        &o.low_temp,
        &o.low_time,
        &o.heat_deg_days,
        &o.cool_deg_days,
        &o.rain,
        &o.wind_avg,
        &o.wind_hi,
        &o.wind_hi_time,
        &o.dom_dir,
        &o.mean_barom,
        &o.mean_hum,
        &o.flagged,
        &o.anomaly_note,
    ]
}

fn record_from_row(row: &csv::StringRecord) -> Option<ArchivedRecord> {
    if row.len() < STORE_HEADER.len() {
        return None;
    }
    let field = |i: usize| row.get(i).unwrap_or("").to_string();
    Some(ArchivedRecord {
        id: field(0),
        observation: Observation {
            year: field(1),
            month: field(2),
            day: field(3),
            mean_temp: field(4),
            high_temp: field(5),
            high_time: field(6),
            low_temp: field(7),
            low_time: field(8),
            heat_deg_days: field(9),
            cool_deg_days: field(10),
            rain: field(11),
            wind_avg: field(12),
            wind_hi: field(13),
            wind_hi_time: field(14),
            dom_dir: field(15),
            mean_barom: field(16),
            mean_hum: field(17),
            flagged: field(18),
            anomaly_note: field(19),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::obfuscator::sequence_id;

    fn sample_records(n: u32) -> Vec<ArchivedRecord> {
        (0..n)
            .map(|i| ArchivedRecord {
                id: sequence_id(i as usize),
                observation: Observation {
                    year: "2010".to_string(),
                    month: "1".to_string(),
                    day: (i + 1).to_string(),
                    rain: "0.0".to_string(),
                    flagged: "F".to_string(),
                    ..Default::default()
                },
            })
            .collect()
    }

    #[tokio::test]
    async fn replace_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArchiveStore::new(dir.path().join("store.csv"));

        let records = sample_records(5);
        store.replace(records.clone()).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn replace_overwrites_previous_store_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArchiveStore::new(dir.path().join("store.csv"));

        store.replace(sample_records(10)).await.unwrap();
        store.replace(sample_records(3)).await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn load_skips_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.csv");
        let store = ArchiveStore::new(path.clone());
        store.replace(sample_records(2)).await.unwrap();

        // Append a truncated row by hand.
        let mut contents = std::fs::read_to_string(&path).unwrap();
        contents.push_str("SC99999,2011,2\n");
        std::fs::write(&path, contents).unwrap();

        assert_eq!(store.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn load_of_missing_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArchiveStore::new(dir.path().join("absent.csv"));
        assert!(matches!(
            store.load().await,
            Err(ArchiveError::StoreOpen(_, _))
        ));
    }

    #[tokio::test]
    async fn notes_with_delimiters_survive_the_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArchiveStore::new(dir.path().join("store.csv"));

        let mut records = sample_records(1);
        records[0].observation.flagged = "Y".to_string();
        records[0].observation.anomaly_note =
            "Unusual humidity; Extreme rainfall, heavy".to_string();
        store.replace(records.clone()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), records);
    }
}
