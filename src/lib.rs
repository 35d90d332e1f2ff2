mod archive;
mod clients;
mod clime;
mod error;
mod ingest;
mod rainfall;
mod retrieval;
mod stats;
mod utils;

pub use clime::{Clime, DEFAULT_BASE_URL};
pub use error::ClimeError;

pub use clients::ingest_client::*;
pub use clients::observations_client::*;
pub use clients::rainfall_client::*;
pub use clients::statistics_client::*;

pub use archive::error::ArchiveError;
pub use archive::observation::{ArchivedRecord, Observation};
pub use archive::store::ArchiveStore;

pub use ingest::error::IngestError;
pub use ingest::month_range::MonthRange;
pub use ingest::parser::{parse_month, parse_month_with_defaults, ReportLayout, TokenDefaults};
pub use ingest::pipeline::IngestSummary;

pub use retrieval::error::RetrievalError;
pub use retrieval::service::ArchiveSummary;

pub use stats::buckets::YearBucket;
pub use stats::coerce::Season;
pub use stats::error::StatsError;
pub use stats::rainfall_totals::YearlyRainfall;
pub use stats::rainy_days::YearlyRainyDays;
pub use stats::trend::TrendLine;

pub use rainfall::error::RainfallDataError;
pub use rainfall::filter::BasicStatistics;
pub use rainfall::record::{month_name, RainfallRecord, MONTH_NAMES};
pub use rainfall::source::{CsvRainfallSource, DataSourceKind, RainfallCatalog};
