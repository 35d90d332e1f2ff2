use crate::archive::error::ArchiveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The supplied unscramble secret did not match. Nothing is read from the
    /// store before this check passes.
    #[error("Access denied: invalid unscramble secret")]
    AccessDenied,

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
