use crate::archive::error::ArchiveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body for {0}")]
    ResponseBody(String, #[source] reqwest::Error),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
