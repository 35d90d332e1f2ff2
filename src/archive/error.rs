use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to create temporary store file next to '{0}'")]
    TempFileCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write archival store '{0}'")]
    StoreWrite(PathBuf, #[source] csv::Error),

    #[error("Failed to replace archival store '{0}'")]
    StoreReplace(PathBuf, #[source] tempfile::PersistError),

    #[error("Failed to open archival store '{0}'")]
    StoreOpen(PathBuf, #[source] std::io::Error),

    #[error("Failed to read archival store '{0}'")]
    StoreRead(PathBuf, #[source] csv::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
