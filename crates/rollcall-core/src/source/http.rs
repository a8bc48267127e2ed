//! Fetches a published CSV export of the roster sheet over HTTP.
//!
//! The sheet owner publishes the availability tab as CSV ("File > Share >
//! Publish to web"); this source downloads that export and hands it to the
//! table parser. Rate limiting is retried here with exponential backoff.

use std::time::Duration;

use reqwest::{header, Client};
use tracing::{debug, warn};

use super::{parse_people_csv, PeopleSource, SchemaAdapter, SourceError};
use crate::models::Person;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Published-CSV source.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpCsvSource {
    client: Client,
    url: String,
    schema: SchemaAdapter,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            schema: SchemaAdapter::default(),
        })
    }

    pub fn with_schema(mut self, schema: SchemaAdapter) -> Self {
        self.schema = schema;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check if response is successful.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>, SourceError> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(SourceError::from_status(status, &body))
        }
    }

    async fn fetch_text(&self) -> Result<String, SourceError> {
        let mut retries = 0;
        let mut backoff = Duration::from_millis(INITIAL_BACKOFF_MS);

        loop {
            let response = self
                .client
                .get(&self.url)
                .header(header::ACCEPT, "text/csv")
                .send()
                .await?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => return Ok(response.text().await?),
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(SourceError::RateLimited);
                    }
                    warn!(url = %self.url, retry = retries, backoff_ms = backoff.as_millis() as u64, "Rate limited, backing off");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2; // Exponential backoff
                }
            }
        }
    }
}

impl PeopleSource for HttpCsvSource {
    async fn load_people(&self) -> Result<Vec<Person>, SourceError> {
        let text = self.fetch_text().await?;
        debug!(url = %self.url, bytes = text.len(), "Fetched roster export");
        if text.trim_start().starts_with('<') {
            return Err(SourceError::InvalidResponse(
                "expected CSV but received HTML; is the sheet published as CSV?".to_string(),
            ));
        }
        parse_people_csv(text.as_bytes(), &self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_url() {
        let source = HttpCsvSource::new("https://docs.google.com/spreadsheets/d/e/abc/pub?output=csv").unwrap();
        assert!(source.url().ends_with("output=csv"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let source = HttpCsvSource::with_timeout("http://127.0.0.1:9/roster.csv", Duration::from_millis(500)).unwrap();
        let err = source.load_people().await.unwrap_err();
        assert!(matches!(err, SourceError::NetworkError(_)));
    }
}
