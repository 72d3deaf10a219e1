//! HTTP client wrapper for JSON lookups.
//!
//! Requests are sent once with a bounded timeout. Timeouts, refused
//! connections and error statuses are all reported to the caller, which
//! decides how to recover.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CloudError, Result};

/// HTTP client for JSON POST requests.
pub struct HttpClient {
    client: Client,
    request_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| CloudError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            request_timeout,
        })
    }

    /// POST `body` as JSON and decode the JSON response.
    ///
    /// A non-2xx status is an error; the body is not read in that case.
    pub async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let resp = self.client.post(url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CloudError::Network(format!("HTTP {} from {}", status, url)));
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| CloudError::InvalidResponse {
            reason: format!("malformed JSON body: {e}"),
        })
    }

    /// Getter for the timeout duration.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
