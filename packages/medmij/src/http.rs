//! HTTP client wrapper for downloading the published lijst.
//!
//! Retry policy lives here, outside the parse pipeline: parsing itself
//! never performs I/O.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{HTTP_TIMEOUT_SECS, MAX_RESPONSE_SIZE};
use crate::error::{MedMijError, Result};

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("medmij/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and
/// user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download content from a URL with retry logic.
///
/// Uses exponential backoff for transient failures (network errors, 5xx
/// responses). Client errors (4xx) are returned immediately.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms, 2000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                // 5xx is worth another attempt
                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                // 4xx never recovers, return it immediately
                let response = response.error_for_status()?;

                if let Some(size) = response.content_length() {
                    if size > MAX_RESPONSE_SIZE {
                        return Err(MedMijError::ResponseTooLarge {
                            size,
                            limit: MAX_RESPONSE_SIZE,
                        });
                    }
                }

                let bytes = response.bytes()?;
                if bytes.len() as u64 > MAX_RESPONSE_SIZE {
                    return Err(MedMijError::ResponseTooLarge {
                        size: bytes.len() as u64,
                        limit: MAX_RESPONSE_SIZE,
                    });
                }
                return Ok(bytes.to_vec());
            }
            Err(e) => {
                // Connect and timeout failures are transient
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                // Anything else (invalid URL, broken body) is final
                return Err(MedMijError::Http(e));
            }
        }
    }

    // All retries exhausted
    Err(MedMijError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Convert downloaded bytes to a string.
///
/// The lijst is published as UTF-8; invalid sequences are replaced rather
/// than treated as fatal, with a warning identifying the document.
///
/// # Arguments
/// * `bytes` - Raw response body
/// * `context` - Description of the document, used in the warning
pub fn bytes_to_string(bytes: &[u8], context: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(e) => {
            tracing::warn!(context, error = %e, "Response is not valid UTF-8, replacing invalid sequences");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
