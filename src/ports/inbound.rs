//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the UI drives the application until the user quits.
#[async_trait::async_trait]
pub trait InputPort: Send {
    /// Run the interactive loop (clock view, edit dialog, import dialog).
    async fn run(&mut self) -> Result<(), DomainError>;
}
