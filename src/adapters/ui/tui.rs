//! Implements InputPort. Inquire-based menu, edit dialog and import dialog.
//!
//! The store is owned here; every mutation happens on this task.

use crate::adapters::ui::{clock_view, progress};
use crate::domain::resolver::{is_time_passed, normalize_wall_time, parse_wall_time};
use crate::domain::{AttendanceForm, DomainError, EditingForm, FormRow, ImportRequest};
use crate::ports::InputPort;
use crate::usecases::{ClockFrame, ClockService, ImportService, ScheduleStore};
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::Validation;
use inquire::{Confirm, InquireError, Select, Text};
use std::fmt;
use std::time::Duration;
use tracing::{error, info};

/// Prompt theme shared by every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightGreen))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainAction {
    ShowClock,
    Edit,
    Import,
    RestoreDefault,
    Quit,
}

impl MainAction {
    const ALL: [MainAction; 5] = [
        MainAction::ShowClock,
        MainAction::Edit,
        MainAction::Import,
        MainAction::RestoreDefault,
        MainAction::Quit,
    ];
}

impl fmt::Display for MainAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MainAction::ShowClock => "Show clock",
            MainAction::Edit => "編輯考程與人數 (edit schedule & attendance)",
            MainAction::Import => "導入考程 (import by course code)",
            MainAction::RestoreDefault => "Restore default schedule",
            MainAction::Quit => "Quit",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditAction {
    EditRow(usize, String),
    AddRow,
    DeleteRow,
    Attendance,
    ToggleSchedule(bool),
    RestoreDefaultRows,
    Save,
    Cancel,
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditAction::EditRow(i, label) => write!(f, "{}. {}", i + 1, label),
            EditAction::AddRow => f.write_str("+ Add row"),
            EditAction::DeleteRow => f.write_str("- Delete row"),
            EditAction::Attendance => f.write_str("Attendance"),
            EditAction::ToggleSchedule(on) => {
                write!(f, "Show schedule on clock: {}", if *on { "on" } else { "off" })
            }
            EditAction::RestoreDefaultRows => f.write_str("Restore default exams"),
            EditAction::Save => f.write_str("Save"),
            EditAction::Cancel => f.write_str("Cancel"),
        }
    }
}

fn row_label(row: &FormRow, passed: bool) -> String {
    let subject = if row.subject.is_empty() {
        "(no subject)"
    } else {
        row.subject.as_str()
    };
    let mark = if passed { "  [ended]" } else { "" };
    format!("{} - {} {}{}", row.start_time, row.end_time, subject, mark)
}

/// Esc yields `None`; Ctrl-C is treated the same inside dialogs.
fn skippable<T>(result: Result<Option<T>, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(v),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn time_validator(input: &str) -> Result<Validation, inquire::CustomUserError> {
    if input.trim().is_empty() || parse_wall_time(input).is_some() {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid("Use HH:MM (24-hour)".into()))
    }
}

/// Spinner text while an import is pending: the live clock and, during an exam, its countdown.
fn loading_message(frame: &ClockFrame) -> String {
    match &frame.current {
        Some(current) => format!(
            "正在載入... {}  {} 還剩 {}",
            frame.time, current.subject, current.remaining
        ),
        None => format!("正在載入... {}", frame.time),
    }
}

/// TUI adapter. Owns the store and drives the use cases.
pub struct TuiInputPort {
    store: ScheduleStore,
    clock: ClockService,
    import: ImportService,
}

impl TuiInputPort {
    pub fn new(store: ScheduleStore, clock: ClockService, import: ImportService) -> Self {
        Self {
            store,
            clock,
            import,
        }
    }

    fn prompt_row(&self, row: &FormRow) -> Result<Option<FormRow>, DomainError> {
        let Some(subject) = skippable(
            Text::new("Subject:")
                .with_initial_value(&row.subject)
                .prompt_skippable(),
        )?
        else {
            return Ok(None);
        };
        let Some(start) = skippable(
            Text::new("Start time (HH:MM):")
                .with_initial_value(&row.start_time)
                .with_validator(time_validator)
                .prompt_skippable(),
        )?
        else {
            return Ok(None);
        };
        let Some(end) = skippable(
            Text::new("End time (HH:MM):")
                .with_initial_value(&row.end_time)
                .with_validator(time_validator)
                .prompt_skippable(),
        )?
        else {
            return Ok(None);
        };
        Ok(Some(FormRow::new(
            subject.trim(),
            normalize_wall_time(&start),
            normalize_wall_time(&end),
        )))
    }

    /// Re-prompts until the counts parse or the user backs out.
    fn prompt_attendance(&self, current: &AttendanceForm) -> Result<Option<AttendanceForm>, DomainError> {
        loop {
            let Some(expected) = skippable(
                Text::new("應到人數 (expected):")
                    .with_initial_value(&current.expected_attendance.to_string())
                    .prompt_skippable(),
            )?
            else {
                return Ok(None);
            };
            let Some(actual) = skippable(
                Text::new("實到人數 (present):")
                    .with_initial_value(&current.actual_attendance.to_string())
                    .prompt_skippable(),
            )?
            else {
                return Ok(None);
            };
            let Some(absent) = skippable(
                Text::new("缺席座號 (absent seats):")
                    .with_initial_value(&current.absent_seat_numbers)
                    .prompt_skippable(),
            )?
            else {
                return Ok(None);
            };
            match AttendanceForm::parse(&expected, &actual, &absent) {
                Ok(form) => return Ok(Some(form)),
                Err(e) => println!("{e}"),
            }
        }
    }

    async fn edit_dialog(&mut self) -> Result<(), DomainError> {
        let mut form: EditingForm = self.store.editing_form();
        loop {
            let now = self.clock.now();
            if form.any_end_time_passed(now) {
                println!("⚠ Some exams have already ended; check their times.");
            }

            let mut actions: Vec<EditAction> = form
                .rows
                .iter()
                .enumerate()
                .map(|(i, r)| EditAction::EditRow(i, row_label(r, is_time_passed(now, &r.end_time))))
                .collect();
            actions.extend([
                EditAction::AddRow,
                EditAction::DeleteRow,
                EditAction::Attendance,
                EditAction::ToggleSchedule(form.show_schedule),
                EditAction::RestoreDefaultRows,
                EditAction::Save,
                EditAction::Cancel,
            ]);

            let choice = skippable(
                Select::new("編輯考程與人數", actions)
                    .with_page_size(15)
                    .prompt_skippable(),
            )?
            .unwrap_or(EditAction::Cancel);

            match choice {
                EditAction::EditRow(i, _) => {
                    if let Some(row) = self.prompt_row(&form.rows[i])? {
                        form.set_row(i, row);
                    }
                }
                EditAction::AddRow => {
                    form.add_row();
                    let last = form.rows.len() - 1;
                    if let Some(row) = self.prompt_row(&form.rows[last])? {
                        form.set_row(last, row);
                    }
                }
                EditAction::DeleteRow => {
                    let labels: Vec<String> = form
                        .rows
                        .iter()
                        .enumerate()
                        .map(|(i, r)| format!("{}. {}", i + 1, row_label(r, false)))
                        .collect();
                    if labels.is_empty() {
                        continue;
                    }
                    if let Some(picked) = skippable(
                        Select::new("Delete which row?", labels).raw_prompt_skippable(),
                    )? {
                        form.delete_row(picked.index);
                    }
                }
                EditAction::Attendance => {
                    if let Some(attendance) = self.prompt_attendance(&form.attendance)? {
                        form.attendance = attendance;
                    }
                }
                EditAction::ToggleSchedule(_) => form.toggle_show_schedule(),
                EditAction::RestoreDefaultRows => {
                    match self.import.fetch(&ImportRequest::Default).await {
                        Ok(records) => form.replace_rows(&records),
                        Err(e) => error!(error = %e, "could not load default exams"),
                    }
                }
                EditAction::Save => {
                    self.store.apply_edit(&form);
                    return Ok(());
                }
                EditAction::Cancel => {
                    let discard = form == self.store.editing_form()
                        || skippable(
                            Confirm::new("Discard changes?")
                                .with_default(true)
                                .prompt_skippable(),
                        )?
                        .unwrap_or(true);
                    if discard {
                        return Ok(());
                    }
                }
            }
        }
    }

    async fn import_dialog(&mut self) -> Result<(), DomainError> {
        let Some(code) = skippable(
            Text::new("輸入考程代碼 (course code):")
                .with_help_message("Esc to cancel")
                .prompt_skippable(),
        )?
        else {
            return Ok(());
        };
        if code.trim().is_empty() {
            println!("{}", DomainError::EmptyCourseCode);
            return Ok(());
        }

        let spinner = progress::spinner(loading_message(&self.clock.frame(&self.store)));
        let ticket = self.store.begin_import();
        let mut fetch = self.import.spawn_fetch(ImportRequest::CourseCode(code));
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        // The clock keeps ticking while the lookup is in flight.
        let outcome = loop {
            tokio::select! {
                joined = &mut fetch => {
                    break Some(joined.unwrap_or_else(|e| Err(DomainError::Import(e.to_string()))));
                }
                _ = ticker.tick() => {
                    spinner.set_message(loading_message(&self.clock.frame(&self.store)));
                }
                _ = &mut ctrl_c => {
                    fetch.abort();
                    break None;
                }
            }
        };
        spinner.finish_and_clear();

        match outcome {
            None => {
                self.store.cancel_import();
                println!("Import cancelled.");
            }
            Some(Ok(records)) => {
                if self.store.apply_import(ticket, &records) {
                    println!("Imported {} exams.", records.len());
                }
            }
            Some(Err(e)) => {
                self.store.abandon_import(ticket);
                error!(error = %e, "Error importing exam data");
                println!("Import failed: {e}");
            }
        }
        Ok(())
    }

    async fn restore_default(&mut self) -> Result<(), DomainError> {
        let confirmed = skippable(
            Confirm::new("Replace the schedule with the default exams?")
                .with_default(false)
                .prompt_skippable(),
        )?
        .unwrap_or(false);
        if !confirmed {
            return Ok(());
        }
        match self
            .import
            .import_into(&mut self.store, &ImportRequest::Default)
            .await
        {
            Ok(true) => println!("Default schedule restored."),
            Ok(false) => {}
            Err(e) => println!("Restore failed: {e}"),
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&mut self) -> Result<(), DomainError> {
        loop {
            let action = skippable(
                Select::new("Exam clock", MainAction::ALL.to_vec()).prompt_skippable(),
            )?
            .unwrap_or(MainAction::Quit);

            match action {
                MainAction::ShowClock => clock_view::run(&self.clock, &self.store).await?,
                MainAction::Edit => self.edit_dialog().await?,
                MainAction::Import => self.import_dialog().await?,
                MainAction::RestoreDefault => self.restore_default().await?,
                MainAction::Quit => break,
            }
        }
        info!("exam clock closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::{Attendance, CountdownMode, default_schedule};
    use crate::usecases::clock_service::build_frame;
    use chrono::NaiveDate;

    fn frame_at(h: u32, m: u32, s: u32) -> ClockFrame {
        let now = NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap();
        build_frame(
            now,
            CountdownMode::MinutesSeconds,
            &default_schedule(),
            &Attendance::default(),
            true,
        )
    }

    #[test]
    fn test_loading_message_follows_the_clock() {
        assert_eq!(
            loading_message(&frame_at(1, 55, 10)),
            "正在載入... 01:55:10  數學 還剩 4 分鐘 50 秒"
        );
        assert_eq!(loading_message(&frame_at(2, 30, 0)), "正在載入... 02:30:00");
    }

    #[test]
    fn test_time_validator() {
        assert!(matches!(time_validator("08:30"), Ok(Validation::Valid)));
        assert!(matches!(time_validator(""), Ok(Validation::Valid)));
        assert!(matches!(time_validator("25:00"), Ok(Validation::Invalid(_))));
    }

    #[test]
    fn test_row_label() {
        let row = FormRow::new("數學", "01:00", "02:00");
        assert_eq!(row_label(&row, false), "01:00 - 02:00 數學");
        assert_eq!(row_label(&row, true), "01:00 - 02:00 數學  [ended]");
        assert_eq!(row_label(&FormRow::default(), false), " -  (no subject)");
    }
}
