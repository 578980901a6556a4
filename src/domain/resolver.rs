//! Current-exam resolution. Maps a wall-clock instant and a schedule to the exam whose
//! window contains that instant.
//!
//! Windows are inclusive at both ends. An entry whose end time sorts before its start time
//! crosses midnight; it is checked both as the window opening today and as the one that
//! opened yesterday. Overlaps resolve to the first entry in list order.

use crate::domain::ExamEntry;
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

/// Inclusive `[start, end]` interval of one exam on a concrete day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ExamWindow {
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.start <= now && now <= self.end
    }
}

/// Parses an `"HH:MM"` wall-clock string. Returns `None` for anything else.
pub fn parse_wall_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Zero-pads a valid time (`"9:05"` -> `"09:05"`) so string comparison stays chronological.
/// Anything unparseable is returned trimmed and otherwise untouched.
pub fn normalize_wall_time(s: &str) -> String {
    parse_wall_time(s)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| s.trim().to_string())
}

/// Zero-padded `HH:MM` strings order the same lexicographically and numerically.
pub fn crosses_midnight(entry: &ExamEntry) -> bool {
    entry.end_time < entry.start_time
}

/// The window of `entry` that contains `now`, if any.
pub fn active_window(now: NaiveDateTime, entry: &ExamEntry) -> Option<ExamWindow> {
    let start_time = parse_wall_time(&entry.start_time)?;
    let end_time = parse_wall_time(&entry.end_time)?;
    let day = now.date();
    let today = ExamWindow {
        start: day.and_time(start_time),
        end: day.and_time(end_time),
    };

    if !crosses_midnight(entry) {
        return today.contains(now).then_some(today);
    }

    let opened_today = ExamWindow {
        start: today.start,
        end: today.end + Duration::days(1),
    };
    if opened_today.contains(now) {
        return Some(opened_today);
    }
    let opened_yesterday = ExamWindow {
        start: today.start - Duration::days(1),
        end: today.end,
    };
    opened_yesterday.contains(now).then_some(opened_yesterday)
}

/// First entry (list order) whose window contains `now`, with its position and that window.
pub fn current_exam_window(
    now: NaiveDateTime,
    schedule: &[ExamEntry],
) -> Option<(usize, &ExamEntry, ExamWindow)> {
    schedule
        .iter()
        .enumerate()
        .find_map(|(i, entry)| active_window(now, entry).map(|w| (i, entry, w)))
}

/// First entry (list order) whose window contains `now`.
pub fn current_exam(now: NaiveDateTime, schedule: &[ExamEntry]) -> Option<&ExamEntry> {
    current_exam_window(now, schedule).map(|(_, entry, _)| entry)
}

/// True when the minute-of-day of `now` is strictly after `time`. Unparseable times never count as passed.
pub fn is_time_passed(now: NaiveDateTime, time: &str) -> bool {
    match parse_wall_time(time) {
        Some(t) => minute_of_day(now.time()) > minute_of_day(t),
        None => false,
    }
}

pub fn any_time_passed<'a>(now: NaiveDateTime, times: impl IntoIterator<Item = &'a str>) -> bool {
    times.into_iter().any(|t| is_time_passed(now, t))
}

fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}
