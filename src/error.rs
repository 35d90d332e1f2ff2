use crate::archive::error::ArchiveError;
use crate::ingest::error::IngestError;
use crate::rainfall::error::RainfallDataError;
use crate::retrieval::error::RetrievalError;
use crate::stats::error::StatsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimeError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    RainfallData(#[from] RainfallDataError),

    #[error("Failed to create data directory '{0}'")]
    DataDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine data directory")]
    DataDirResolution,

    #[error("Data path exists but is not a directory: {0}")]
    DataDirNotADirectory(PathBuf),
}
