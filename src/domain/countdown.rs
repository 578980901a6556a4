//! Remaining-time countdown for the current exam.

use crate::domain::CountdownMode;
use chrono::NaiveDateTime;

/// Whole minutes and the seconds within the last minute, both clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    pub fn between(now: NaiveDateTime, end: NaiveDateTime) -> Self {
        let ms = end.signed_duration_since(now).num_milliseconds();
        if ms < 0 {
            return Self::default();
        }
        Self {
            minutes: ms / 60_000,
            seconds: (ms / 1000) % 60,
        }
    }

    pub fn render(&self, mode: CountdownMode) -> String {
        match mode {
            CountdownMode::MinutesOnly => format!("{} 分鐘", self.minutes),
            CountdownMode::MinutesSeconds if self.minutes == 0 => format!("{} 秒", self.seconds),
            CountdownMode::MinutesSeconds if self.minutes < 10 => {
                format!("{} 分鐘 {} 秒", self.minutes, self.seconds)
            }
            CountdownMode::MinutesSeconds => format!("{} 分鐘", self.minutes),
        }
    }
}

pub fn format_remaining(now: NaiveDateTime, end: NaiveDateTime, mode: CountdownMode) -> String {
    Remaining::between(now, end).render(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_minutes_only_mode() {
        let now = at(9, 0, 0);
        assert_eq!(
            format_remaining(now, at(10, 0, 0), CountdownMode::MinutesOnly),
            "60 分鐘"
        );
        assert_eq!(
            format_remaining(now, at(9, 5, 30), CountdownMode::MinutesOnly),
            "5 分鐘"
        );
    }

    #[test]
    fn test_past_end_renders_zero() {
        let now = at(11, 0, 0);
        let end = at(10, 0, 0);
        assert_eq!(Remaining::between(now, end), Remaining::default());
        assert_eq!(format_remaining(now, end, CountdownMode::MinutesOnly), "0 分鐘");
        assert_eq!(format_remaining(now, end, CountdownMode::MinutesSeconds), "0 秒");
    }

    #[test]
    fn test_minutes_seconds_under_ten_minutes() {
        let end = at(10, 0, 0);
        let now = end - Duration::seconds(9 * 60 + 59);
        assert_eq!(
            format_remaining(now, end, CountdownMode::MinutesSeconds),
            "9 分鐘 59 秒"
        );
    }

    #[test]
    fn test_minutes_seconds_zero_minutes_is_seconds_only() {
        let end = at(10, 0, 0);
        let now = end - Duration::seconds(30);
        assert_eq!(format_remaining(now, end, CountdownMode::MinutesSeconds), "30 秒");
    }

    #[test]
    fn test_minutes_seconds_at_ten_minutes_drops_seconds() {
        let end = at(10, 0, 0);
        let now = end - Duration::seconds(10 * 60 + 15);
        assert_eq!(
            format_remaining(now, end, CountdownMode::MinutesSeconds),
            "10 分鐘"
        );
    }

    #[test]
    fn test_subsecond_remaining_floors() {
        let end = at(10, 0, 0);
        let now = end - Duration::milliseconds(61_500);
        assert_eq!(
            Remaining::between(now, end),
            Remaining {
                minutes: 1,
                seconds: 1
            }
        );
    }
}
