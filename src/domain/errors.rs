//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Import failed: {0}")]
    Import(String),

    /// Rejected before any request is issued.
    #[error("Course code is empty")]
    EmptyCourseCode,

    #[error("Invalid attendance input: {0}")]
    InvalidAttendance(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error("Server error: {0}")]
    Server(String),
}
