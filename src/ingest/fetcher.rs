use crate::ingest::error::IngestError;
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

/// Per-request timeout. A stalled month delays the next fetch but is never
/// retried; incomplete batches are an accepted outcome.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches one month's raw report at a time from the remote summary endpoint.
pub struct ReportFetcher {
    client: Client,
    base_url: String,
}

impl ReportFetcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn month_url(&self, year: i32, month: u32) -> String {
        format!("{}/summary/{}_{:02}", self.base_url, year, month)
    }

    /// Downloads the raw report text for `(year, month)`. Network failures,
    /// timeouts and non-2xx responses are all per-month errors; the batch
    /// loop decides whether to continue.
    pub async fn fetch_month(&self, year: i32, month: u32) -> Result<String, IngestError> {
        let url = self.month_url(year, month);
        info!("Fetching report from {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| IngestError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    IngestError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    IngestError::NetworkRequest(url, e)
                });
            }
        };

        response
            .text()
            .await
            .map_err(|e| IngestError::ResponseBody(url, e))
    }
}
