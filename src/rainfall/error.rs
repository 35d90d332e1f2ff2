use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RainfallDataError {
    #[error("Failed to open rainfall data file {0:?}")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("Failed to read rainfall data from {0:?}")]
    Read(PathBuf, #[source] csv::Error),

    #[error("Rainfall data file {0:?} contained no usable rows")]
    Empty(PathBuf),

    #[error(transparent)]
    TaskJoin(#[from] tokio::task::JoinError),
}
