//! Mock course lookup for offline runs and testing.
//!
//! Answers every code with the default records after a simulated delay.

use crate::domain::{DomainError, default_import_records};
use crate::ports::CourseLookupPort;
use std::time::Duration;
use tracing::info;

pub struct MockCourseLookup {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockCourseLookup {
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

#[async_trait::async_trait]
impl CourseLookupPort for MockCourseLookup {
    async fn lookup(&self, code: &str) -> Result<serde_json::Value, DomainError> {
        info!(code, "[MOCK] simulating course lookup");
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        serde_json::to_value(default_import_records())
            .map_err(|e| DomainError::Import(e.to_string()))
    }
}
