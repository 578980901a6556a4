//! Full-screen clock view. One frame per second until `q`/`Esc`.
//!
//! Keys are polled on a faster interval than the 1 Hz redraw so leaving feels immediate.

use crate::domain::DomainError;
use crate::usecases::{ClockFrame, ClockService, ScheduleStore};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{Stdout, Write, stdout};
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);
const KEY_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Subject,
    Time,
    Countdown,
    Heading,
    Active,
    Passed,
    Entry,
    Footer,
    Blank,
}

/// Text lines of a frame, top to bottom.
pub fn layout(frame: &ClockFrame) -> Vec<(LineKind, String)> {
    let mut lines = Vec::new();
    if let Some(current) = &frame.current {
        lines.push((LineKind::Subject, current.subject.clone()));
    }
    lines.push((LineKind::Time, frame.time.clone()));
    if let Some(current) = &frame.current {
        lines.push((LineKind::Countdown, format!("還剩 {}", current.remaining)));
    }
    lines.push((LineKind::Blank, String::new()));

    if frame.show_schedule {
        lines.push((LineKind::Heading, "今天的考程表".to_string()));
        for line in &frame.schedule {
            let kind = if line.active {
                LineKind::Active
            } else if line.passed {
                LineKind::Passed
            } else {
                LineKind::Entry
            };
            lines.push((kind, format!("  {}", line.text)));
        }
        lines.push((LineKind::Blank, String::new()));
    }

    let a = &frame.attendance;
    lines.push((LineKind::Entry, format!("應到人數: {}", a.total)));
    lines.push((LineKind::Entry, format!("實到人數: {}", a.present)));
    lines.push((
        LineKind::Entry,
        format!("缺席座號: {}", a.absent_seat_numbers.as_deref().unwrap_or("")),
    ));
    lines.push((LineKind::Blank, String::new()));
    lines.push((LineKind::Footer, "q / Esc: back to menu".to_string()));
    lines
}

fn ui_err(e: std::io::Error) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// Takes over the terminal until the user leaves; restores it on every exit path.
pub async fn run(clock: &ClockService, store: &ScheduleStore) -> Result<(), DomainError> {
    let mut out = stdout();
    terminal::enable_raw_mode().map_err(ui_err)?;
    if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
        let _ = terminal::disable_raw_mode();
        return Err(ui_err(e));
    }

    let result = tick_loop(&mut out, clock, store).await;

    let _ = execute!(out, Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    result
}

async fn tick_loop(
    out: &mut Stdout,
    clock: &ClockService,
    store: &ScheduleStore,
) -> Result<(), DomainError> {
    let mut ticker = tokio::time::interval(TICK);
    let mut keys = tokio::time::interval(KEY_POLL);
    loop {
        tokio::select! {
            _ = ticker.tick() => render(out, &clock.frame(store)).map_err(ui_err)?,
            _ = keys.tick() => {
                if quit_requested().map_err(ui_err)? {
                    return Ok(());
                }
            }
        }
    }
}

fn quit_requested() -> std::io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn render(out: &mut Stdout, frame: &ClockFrame) -> std::io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    for (row, (kind, text)) in layout(frame).iter().enumerate() {
        queue!(out, MoveTo(2, row as u16 + 1))?;
        match kind {
            LineKind::Subject | LineKind::Time => {
                queue!(out, SetAttribute(Attribute::Bold), SetForegroundColor(Color::White))?
            }
            LineKind::Countdown => queue!(out, SetForegroundColor(Color::Yellow))?,
            LineKind::Heading => queue!(out, SetAttribute(Attribute::Underlined))?,
            LineKind::Active => queue!(out, SetForegroundColor(Color::Green))?,
            LineKind::Passed | LineKind::Footer => queue!(out, SetForegroundColor(Color::DarkGrey))?,
            LineKind::Entry | LineKind::Blank => {}
        }
        queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
    }
    out.flush()
}
