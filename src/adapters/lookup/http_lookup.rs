//! HTTP course lookup. Fetches a schedule for a course code from the remote service.

use crate::domain::DomainError;
use crate::ports::CourseLookupPort;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Default remote lookup endpoint; the code is passed as `?code=`.
pub const DEFAULT_LOOKUP_URL: &str = "https://api.simple.taipei/clock/import.php";

pub struct HttpCourseLookup {
    client: Client,
    lookup_url: String,
}

impl HttpCourseLookup {
    /// # Arguments
    /// * `lookup_url` - Endpoint receiving `?code=<code>`
    /// * `timeout` - Whole-request timeout
    pub fn new(lookup_url: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Import(format!("HTTP client: {}", e)))?;
        Ok(Self { client, lookup_url })
    }
}

#[async_trait::async_trait]
impl CourseLookupPort for HttpCourseLookup {
    async fn lookup(&self, code: &str) -> Result<serde_json::Value, DomainError> {
        debug!(url = %self.lookup_url, code, "course lookup request");
        let response = self
            .client
            .get(&self.lookup_url)
            .query(&[("code", code)])
            .send()
            .await
            .map_err(|e| DomainError::Import(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "course lookup returned error");
            return Err(DomainError::Import(format!(
                "Lookup error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::Import(format!("Failed to parse lookup response: {}", e)))
    }
}
