//! Status line drawn on stdout with crossterm.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use tickerbar_core::display::{RenderOutput, RenderSink, TextColor};

/// Redraws a single terminal line on every frame.
pub struct TerminalSink {
    stdout: Mutex<Stdout>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(io::stdout()),
        }
    }

    /// Prints `message` on its own line; the next frame redraws below it.
    pub fn message(&self, message: &str) {
        if let Ok(mut guard) = self.stdout.lock() {
            let out: &mut Stdout = &mut guard;
            let result = queue!(
                out,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                Print(message),
                Print("\n")
            )
            .and_then(|_| out.flush());
            if let Err(e) = result {
                tracing::debug!("Failed to write to terminal: {}", e);
            }
        }
    }

    fn draw(out: &mut impl Write, output: &RenderOutput) -> io::Result<()> {
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        for run in &output.runs {
            match run.color {
                Some(color) => queue!(
                    out,
                    SetForegroundColor(terminal_color(color)),
                    Print(&run.text),
                    ResetColor
                )?,
                None => queue!(out, Print(&run.text))?,
            }
        }
        out.flush()
    }
}

impl RenderSink for TerminalSink {
    fn render(&self, output: &RenderOutput) {
        if let Ok(mut out) = self.stdout.lock() {
            if let Err(e) = Self::draw(&mut *out, output) {
                tracing::debug!("Failed to draw status line: {}", e);
            }
        }
    }
}

fn terminal_color(color: TextColor) -> Color {
    match color {
        TextColor::Success => Color::Green,
        TextColor::Failure => Color::Red,
        TextColor::Secondary => Color::DarkGrey,
    }
}
