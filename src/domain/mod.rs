//! Core domain layer. No external I/O dependencies.
//!
//! Entities and the schedule rules (resolution, countdown, editing, import) live here.
//! Dependencies flow inward.

pub mod countdown;
pub mod editing;
pub mod entities;
pub mod errors;
pub mod import;
pub mod resolver;

pub use countdown::{Remaining, format_remaining};
pub use editing::{AttendanceForm, EditingForm, FormRow, reduce_schedule};
pub use entities::{Attendance, CountdownMode, ExamEntry, ImportRecord, ImportRequest, Schedule};
pub use errors::DomainError;
pub use import::{default_import_records, default_schedule, merge_import, parse_import_payload};
pub use resolver::{ExamWindow, current_exam, current_exam_window, is_time_passed};
