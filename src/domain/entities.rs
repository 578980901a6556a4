//! Domain entities. Pure data structures for the exam clock.
//!
//! No terminal, HTTP or file types here; adapters map into these.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One scheduled time block with a subject label.
///
/// Times are wall-clock-of-day strings (`"HH:MM"`, 24-hour). They are kept as text and
/// only parsed when a window or countdown is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamEntry {
    pub id: u32,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
}

impl ExamEntry {
    pub fn new(
        id: u32,
        subject: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id,
            subject: subject.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// Ordered exam entries. Order is display order, not chronological order.
pub type Schedule = Vec<ExamEntry>;

/// Expected/actual head count for the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub total: u32,
    pub present: u32,
    pub absent_seat_numbers: Option<String>,
}

impl Attendance {
    /// Builds attendance; an empty or blank absentee list is stored as `None`.
    pub fn new(total: u32, present: u32, absent_seat_numbers: impl Into<String>) -> Self {
        let absent: String = absent_seat_numbers.into();
        Self {
            total,
            present,
            absent_seat_numbers: if absent.trim().is_empty() {
                None
            } else {
                Some(absent)
            },
        }
    }
}

impl Default for Attendance {
    fn default() -> Self {
        Self {
            total: 36,
            present: 36,
            absent_seat_numbers: None,
        }
    }
}

/// A record delivered by an import source. `id` is optional; missing ids are assigned
/// by position when the import is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
}

impl ImportRecord {
    pub fn new(
        subject: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            subject: subject.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }
}

/// Which import path to take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRequest {
    /// Fixed default/reset lookup; needs no user input.
    Default,
    /// Remote lookup by course code.
    CourseCode(String),
}

/// How the remaining time of the current exam is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownMode {
    /// Always `"<min> 分鐘"`.
    MinutesOnly,
    /// Adds seconds under ten minutes; seconds only once the minute count hits zero.
    #[default]
    MinutesSeconds,
}

impl FromStr for CountdownMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minutes" | "minutes_only" => Ok(Self::MinutesOnly),
            "minutes_seconds" | "seconds" => Ok(Self::MinutesSeconds),
            other => Err(format!("unknown countdown mode: {other}")),
        }
    }
}

impl fmt::Display for CountdownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinutesOnly => f.write_str("minutes"),
            Self::MinutesSeconds => f.write_str("minutes_seconds"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_entry_uses_camel_case_layout() {
        let entry = ExamEntry::new(1, "數學", "01:00", "02:00");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"subject":"數學","startTime":"01:00","endTime":"02:00"}"#
        );
    }

    #[test]
    fn test_import_record_id_is_optional() {
        let rec: ImportRecord =
            serde_json::from_str(r#"{"subject":"國文","startTime":"03:00","endTime":"04:00"}"#)
                .unwrap();
        assert_eq!(rec.id, None);
        assert_eq!(rec.start_time, "03:00");
    }

    #[test]
    fn test_attendance_blank_absentees_normalize_to_none() {
        assert_eq!(Attendance::new(30, 30, "  ").absent_seat_numbers, None);
        assert_eq!(
            Attendance::new(30, 28, "3, 17").absent_seat_numbers.as_deref(),
            Some("3, 17")
        );
    }

    #[test]
    fn test_countdown_mode_from_str() {
        assert_eq!(
            "minutes".parse::<CountdownMode>(),
            Ok(CountdownMode::MinutesOnly)
        );
        assert_eq!(
            " Minutes_Seconds ".parse::<CountdownMode>(),
            Ok(CountdownMode::MinutesSeconds)
        );
        assert!("hours".parse::<CountdownMode>().is_err());
    }
}
