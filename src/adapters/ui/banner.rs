//! Welcome banner with a vertical gradient (EXAM CLOCK).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Chalkboard green.
const BOARD_GREEN: (u8, u8, u8) = (0x2e, 0x8b, 0x57);
/// Chalk white.
const CHALK: (u8, u8, u8) = (0xf5, 0xf5, 0xdc);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// ASCII art for the title, or the plain title if the built-in font fails to load.
fn title_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("EXAM CLOCK").map(|fig| fig.to_string()))
        .unwrap_or_else(|| "EXAM CLOCK".to_string())
}

/// Prints the welcome banner, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let art = title_art();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(BOARD_GREEN, CHALK, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: CHALK.0,
        g: CHALK.1,
        b: CHALK.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", env!("CARGO_PKG_VERSION"))));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
