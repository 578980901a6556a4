//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, Schedule};
use chrono::NaiveDateTime;

/// Persistence bridge for the schedule.
#[async_trait::async_trait]
pub trait SchedulePersistence: Send + Sync {
    /// Stored schedule. Returns an empty schedule when nothing is stored or the stored
    /// data cannot be parsed; only I/O that prevents reading at all is an error.
    async fn load_schedule(&self) -> Result<Schedule, DomainError>;

    /// Store the schedule, replacing what was there. Last write wins.
    async fn save_schedule(&self, schedule: &Schedule) -> Result<(), DomainError>;
}

/// Remote course-code lookup. Returns the service's JSON body untouched.
#[async_trait::async_trait]
pub trait CourseLookupPort: Send + Sync {
    async fn lookup(&self, code: &str) -> Result<serde_json::Value, DomainError>;
}

/// Wall-clock source. Only hour/minute/second of the result are significant to the schedule rules.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
