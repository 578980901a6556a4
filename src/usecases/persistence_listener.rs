//! Async task: reads schedule snapshots from the store's channel and saves each one.
//!
//! Runs beside the UI loop. Save failures are logged; the next write retries naturally.

use crate::domain::Schedule;
use crate::ports::SchedulePersistence;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Persistence listener. Consumes the store's snapshot channel.
pub struct PersistenceListener {
    persistence: Arc<dyn SchedulePersistence>,
    rx: mpsc::UnboundedReceiver<Schedule>,
}

impl PersistenceListener {
    pub fn new(
        persistence: Arc<dyn SchedulePersistence>,
        rx: mpsc::UnboundedReceiver<Schedule>,
    ) -> Self {
        Self { persistence, rx }
    }

    /// Run the listener. Processes until the store (sender) is dropped.
    pub async fn run(mut self) {
        while let Some(schedule) = self.rx.recv().await {
            match self.persistence.save_schedule(&schedule).await {
                Ok(()) => debug!(entries = schedule.len(), "schedule saved"),
                Err(e) => error!(error = %e, "schedule save failed"),
            }
        }
        info!("persistence listener finished (store closed)");
    }
}
