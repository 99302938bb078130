use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::quotes::{Quote, QuoteBook};
use crate::util::{strip_control_chars, validate_endpoint, UrlValidationError};

/// Category given to every quote that arrives from the remote.
pub const SERVER_CATEGORY: &str = "Server";

const MAX_RESPONSE_SIZE: usize = 1024 * 1024; // 1MB

/// Errors from a single sync request.
///
/// None of these are fatal: the tick is abandoned and the store is unchanged.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body was not a JSON array
    #[error("Parse error: {0}")]
    Parse(String),
    /// Response body exceeded the 1MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Merged quotes could not be written to storage
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Resolved sync parameters.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub endpoint: Url,
    pub batch_size: usize,
    pub timeout: Duration,
    pub push_enabled: bool,
}

impl SyncSettings {
    pub fn from_config(config: &Config) -> Result<Self, UrlValidationError> {
        Ok(Self {
            endpoint: validate_endpoint(&config.sync_url)?,
            batch_size: config.sync_batch_size,
            timeout: config.sync_timeout(),
            push_enabled: config.push_new_quotes,
        })
    }
}

/// Result of a tick that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Quotes mapped from the remote batch.
    pub fetched: usize,
    /// Quotes actually appended to the store.
    pub added: Vec<Quote>,
}

#[derive(Debug)]
pub enum SyncOutcome {
    /// Another tick was already in flight.
    Skipped,
    Failed(SyncError),
    Completed(SyncReport),
}

/// Clears the in-flight flag when dropped.
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Talks to the remote endpoint. Cheap to clone; clones share the in-flight flag.
#[derive(Clone)]
pub struct SyncAgent {
    client: reqwest::Client,
    settings: Arc<SyncSettings>,
    in_flight: Arc<AtomicBool>,
}

impl SyncAgent {
    pub fn new(client: reqwest::Client, settings: SyncSettings) -> Self {
        Self {
            client,
            settings: Arc::new(settings),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claim the in-flight slot, or `None` if a tick is already running.
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                flag: Arc::clone(&self.in_flight),
            })
    }

    /// GET the remote list and map up to `batch_size` items to quotes.
    pub async fn fetch_batch(&self) -> Result<Vec<Quote>, SyncError> {
        let body = tokio::time::timeout(self.settings.timeout, self.get_body())
            .await
            .map_err(|_| SyncError::Timeout)??;
        map_remote_items(&body, self.settings.batch_size)
    }

    async fn get_body(&self) -> Result<Vec<u8>, SyncError> {
        let response = self
            .client
            .get(self.settings.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SyncError::HttpStatus(response.status().as_u16()));
        }

        read_limited_bytes(response, MAX_RESPONSE_SIZE).await
    }

    /// Run one full tick: fetch, merge into `book`, persist.
    ///
    /// Never returns an error; failures are logged and reported in the outcome
    /// with the store left as it was.
    pub async fn sync_tick(&self, book: &mut QuoteBook) -> SyncOutcome {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("Sync already in progress, skipping tick");
            return SyncOutcome::Skipped;
        };

        let batch = match self.fetch_batch().await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(endpoint = %self.settings.endpoint, error = %e, "Sync fetch failed");
                return SyncOutcome::Failed(e);
            }
        };

        let fetched = batch.len();
        match book.merge_remote(batch).await {
            Ok(added) => SyncOutcome::Completed(SyncReport { fetched, added }),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to persist synced quotes");
                SyncOutcome::Failed(SyncError::Storage(e.to_string()))
            }
        }
    }

    /// POST one quote to the remote. The acknowledgement body is only logged.
    pub async fn post_quote(&self, quote: &Quote) -> Result<(), SyncError> {
        let body = serde_json::to_vec(quote).map_err(|e| SyncError::Parse(e.to_string()))?;

        let request = self
            .client
            .post(self.settings.endpoint.clone())
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .body(body)
            .send();

        let response = tokio::time::timeout(self.settings.timeout, request)
            .await
            .map_err(|_| SyncError::Timeout)??;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::HttpStatus(status.as_u16()));
        }

        let ack = read_limited_bytes(response, MAX_RESPONSE_SIZE)
            .await
            .unwrap_or_default();
        tracing::debug!(status = %status, ack_bytes = ack.len(), "Quote pushed to server");
        Ok(())
    }

    /// Push a freshly added quote. Failures are logged, never retried.
    pub async fn push_quote(&self, quote: &Quote) {
        if !self.settings.push_enabled {
            return;
        }
        if let Err(e) = self.post_quote(quote).await {
            tracing::warn!(endpoint = %self.settings.endpoint, error = %e, "Failed to push quote");
        }
    }
}

/// Map a remote response body to quotes.
///
/// The body must be a JSON array. Items are read in order up to `limit`; each
/// needs a non-empty string `title`. The first item without one ends the
/// batch, keeping whatever was mapped before it.
pub fn map_remote_items(body: &[u8], limit: usize) -> Result<Vec<Quote>, SyncError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| SyncError::Parse(e.to_string()))?;
    let items = value
        .as_array()
        .ok_or_else(|| SyncError::Parse("expected a JSON array".to_string()))?;

    let mut quotes = Vec::with_capacity(limit.min(items.len()));
    for (idx, item) in items.iter().take(limit).enumerate() {
        let title = item
            .get("title")
            .and_then(serde_json::Value::as_str)
            .map(|t| strip_control_chars(t).trim().to_string())
            .filter(|t| !t.is_empty());

        match title {
            Some(text) => quotes.push(Quote::new(text, SERVER_CATEGORY)),
            None => {
                tracing::warn!(index = idx, kept = quotes.len(), "Remote item has no title, dropping rest of batch");
                break;
            }
        }
    }
    Ok(quotes)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, SyncError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(SyncError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(SyncError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
