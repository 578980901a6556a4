//! Per-tick derivation: clock time -> current exam -> countdown -> a frame the UI renders.

use crate::domain::resolver::current_exam_window;
use crate::domain::{Attendance, CountdownMode, ExamEntry, format_remaining, is_time_passed};
use crate::ports::ClockPort;
use crate::usecases::ScheduleStore;
use chrono::NaiveDateTime;
use std::sync::Arc;

/// The exam in progress and its countdown text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentExam {
    pub id: u32,
    pub subject: String,
    pub remaining: String,
}

/// One line of the day's schedule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleLine {
    pub id: u32,
    pub text: String,
    pub active: bool,
    pub passed: bool,
}

/// Everything the clock screen shows for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFrame {
    pub time: String,
    pub current: Option<CurrentExam>,
    pub schedule: Vec<ScheduleLine>,
    pub attendance: Attendance,
    pub show_schedule: bool,
}

pub struct ClockService {
    clock: Arc<dyn ClockPort>,
    mode: CountdownMode,
}

impl ClockService {
    pub fn new(clock: Arc<dyn ClockPort>, mode: CountdownMode) -> Self {
        Self { clock, mode }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn frame(&self, store: &ScheduleStore) -> ClockFrame {
        build_frame(
            self.clock.now(),
            self.mode,
            store.schedule(),
            store.attendance(),
            store.show_schedule(),
        )
    }
}

pub fn build_frame(
    now: NaiveDateTime,
    mode: CountdownMode,
    schedule: &[ExamEntry],
    attendance: &Attendance,
    show_schedule: bool,
) -> ClockFrame {
    let resolved = current_exam_window(now, schedule);
    let active_index = resolved.as_ref().map(|(i, _, _)| *i);
    let current = resolved.map(|(_, entry, window)| CurrentExam {
        id: entry.id,
        subject: entry.subject.clone(),
        remaining: format_remaining(now, window.end, mode),
    });

    ClockFrame {
        time: now.format("%H:%M:%S").to_string(),
        schedule: schedule
            .iter()
            .enumerate()
            .map(|(i, e)| ScheduleLine {
                id: e.id,
                text: format!("{} - {} {}", e.start_time, e.end_time, e.subject),
                active: Some(i) == active_index,
                passed: is_time_passed(now, &e.end_time),
            })
            .collect(),
        current,
        attendance: attendance.clone(),
        show_schedule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_schedule;
    use chrono::NaiveDate;

    struct FixedClock(NaiveDateTime);

    impl ClockPort for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_frame_during_exam() {
        let service = ClockService::new(
            Arc::new(FixedClock(at(1, 51, 30))),
            CountdownMode::MinutesSeconds,
        );
        let store = ScheduleStore::new(default_schedule());
        let frame = service.frame(&store);

        assert_eq!(frame.time, "01:51:30");
        let current = frame.current.unwrap();
        assert_eq!(current.subject, "數學");
        assert_eq!(current.remaining, "8 分鐘 30 秒");
        assert!(frame.schedule[0].active);
        assert!(!frame.schedule[1].active);
        assert_eq!(frame.schedule[1].text, "03:00 - 04:00 國文");
    }

    #[test]
    fn test_frame_between_exams() {
        let frame = build_frame(
            at(4, 30, 0),
            CountdownMode::MinutesOnly,
            &default_schedule(),
            &Attendance::default(),
            true,
        );
        assert!(frame.current.is_none());
        let passed: Vec<bool> = frame.schedule.iter().map(|l| l.passed).collect();
        assert_eq!(passed, vec![true, true, false]);
    }

    #[test]
    fn test_only_the_resolved_line_is_active_when_ids_repeat() {
        let schedule = vec![
            ExamEntry::new(2, "英文", "08:00", "09:00"),
            ExamEntry::new(2, "數學", "10:00", "11:00"),
        ];
        let frame = build_frame(
            at(8, 30, 0),
            CountdownMode::MinutesOnly,
            &schedule,
            &Attendance::default(),
            true,
        );
        let active: Vec<bool> = frame.schedule.iter().map(|l| l.active).collect();
        assert_eq!(active, vec![true, false]);
        assert_eq!(frame.current.unwrap().subject, "英文");
    }

    #[test]
    fn test_wrapped_exam_counts_down_past_midnight() {
        let schedule = vec![ExamEntry::new(1, "夜考", "23:30", "00:30")];
        let frame = build_frame(
            at(23, 45, 0),
            CountdownMode::MinutesOnly,
            &schedule,
            &Attendance::default(),
            true,
        );
        assert_eq!(frame.current.unwrap().remaining, "45 分鐘");
    }
}
