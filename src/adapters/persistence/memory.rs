//! In-memory SchedulePersistence. Used for ephemeral runs and tests.

use crate::domain::{DomainError, Schedule};
use crate::ports::SchedulePersistence;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct MemoryPersistence {
    schedule: Mutex<Schedule>,
    saves: AtomicUsize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(schedule: Schedule) -> Self {
        Self {
            schedule: Mutex::new(schedule),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SchedulePersistence for MemoryPersistence {
    async fn load_schedule(&self) -> Result<Schedule, DomainError> {
        self.schedule
            .lock()
            .map(|s| s.clone())
            .map_err(|e| DomainError::Persistence(e.to_string()))
    }

    async fn save_schedule(&self, schedule: &Schedule) -> Result<(), DomainError> {
        let mut slot = self
            .schedule
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        *slot = schedule.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
