//! Editing form and the reducer that folds a saved form back into the schedule.
//!
//! Rows are positional: row `i` of the form is merged onto entry `i` of the previous
//! schedule and inherits its id. Rows beyond the previous length get fresh ids above the
//! largest id in use. Previous entries beyond the form's length are dropped.

use crate::domain::resolver::any_time_passed;
use crate::domain::{Attendance, DomainError, ExamEntry, ImportRecord, Schedule};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormRow {
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
}

impl FormRow {
    pub fn new(
        subject: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl From<&ExamEntry> for FormRow {
    fn from(e: &ExamEntry) -> Self {
        Self::new(&e.subject, &e.start_time, &e.end_time)
    }
}

impl From<&ImportRecord> for FormRow {
    fn from(r: &ImportRecord) -> Self {
        Self::new(&r.subject, &r.start_time, &r.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttendanceForm {
    pub expected_attendance: u32,
    pub actual_attendance: u32,
    pub absent_seat_numbers: String,
}

impl AttendanceForm {
    /// Validates raw text fields. Counts must be non-negative integers.
    pub fn parse(expected: &str, actual: &str, absent: &str) -> Result<Self, DomainError> {
        Ok(Self {
            expected_attendance: parse_count("expected attendance", expected)?,
            actual_attendance: parse_count("actual attendance", actual)?,
            absent_seat_numbers: absent.trim().to_string(),
        })
    }
}

impl From<&Attendance> for AttendanceForm {
    fn from(a: &Attendance) -> Self {
        Self {
            expected_attendance: a.total,
            actual_attendance: a.present,
            absent_seat_numbers: a.absent_seat_numbers.clone().unwrap_or_default(),
        }
    }
}

impl From<&AttendanceForm> for Attendance {
    fn from(f: &AttendanceForm) -> Self {
        Attendance::new(
            f.expected_attendance,
            f.actual_attendance,
            f.absent_seat_numbers.clone(),
        )
    }
}

fn parse_count(field: &str, raw: &str) -> Result<u32, DomainError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| DomainError::InvalidAttendance(format!("{field}: {raw:?} is not a count")))
}

/// Transient state of the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingForm {
    pub rows: Vec<FormRow>,
    pub attendance: AttendanceForm,
    pub show_schedule: bool,
}

impl EditingForm {
    /// Form for a dialog opened without prior state: one empty row, zero counts.
    pub fn blank() -> Self {
        Self {
            rows: vec![FormRow::default()],
            attendance: AttendanceForm::default(),
            show_schedule: true,
        }
    }

    pub fn from_state(schedule: &[ExamEntry], attendance: &Attendance, show_schedule: bool) -> Self {
        Self {
            rows: schedule.iter().map(FormRow::from).collect(),
            attendance: AttendanceForm::from(attendance),
            show_schedule,
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(FormRow::default());
    }

    /// Removes row `index`, shifting later rows up. Out-of-range indexes are ignored.
    pub fn delete_row(&mut self, index: usize) -> Option<FormRow> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    pub fn set_row(&mut self, index: usize, row: FormRow) -> bool {
        match self.rows.get_mut(index) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    /// Replaces all rows (the edit dialog's "restore default exam"). Attendance and the toggle are kept.
    pub fn replace_rows(&mut self, records: &[ImportRecord]) {
        self.rows = records.iter().map(FormRow::from).collect();
    }

    pub fn toggle_show_schedule(&mut self) {
        self.show_schedule = !self.show_schedule;
    }

    pub fn any_end_time_passed(&self, now: NaiveDateTime) -> bool {
        any_time_passed(now, self.rows.iter().map(|r| r.end_time.as_str()))
    }
}

/// Folds form rows onto the previous schedule positionally.
pub fn reduce_schedule(previous: &[ExamEntry], rows: &[FormRow]) -> Schedule {
    let mut next_id = previous.iter().map(|e| e.id).max().unwrap_or(0) + 1;
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let id = match previous.get(i) {
                Some(base) => base.id,
                None => {
                    let id = next_id;
                    next_id += 1;
                    id
                }
            };
            ExamEntry::new(id, &row.subject, &row.start_time, &row.end_time)
        })
        .collect()
}
