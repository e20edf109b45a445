use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

/// Width of the rendered bar in cells.
const BAR_SIZE: usize = 40;

/// Completion counter with an optional text bar on stderr.
///
/// `advance` may be called from many tasks at once; the counter is atomic.
/// Rendering is advisory and overlapping writes are tolerated.
#[derive(Debug)]
pub struct ProgressTracker {
    label: String,
    total: usize,
    completed: AtomicUsize,
    render: bool,
    no_color: bool,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(label: impl Into<String>, total: usize, render: bool, no_color: bool) -> Self {
        Self {
            label: label.into(),
            total,
            completed: AtomicUsize::new(0),
            render,
            no_color,
        }
    }

    /// Renders only when enabled and stderr is attached to a terminal.
    #[must_use]
    pub fn for_terminal(label: impl Into<String>, total: usize, enabled: bool, no_color: bool) -> Self {
        let render = enabled && std::io::stderr().is_terminal();
        Self::new(label, total, render, no_color)
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    pub fn advance(&self) {
        let completed = self
            .completed
            .fetch_add(1, Ordering::Relaxed)
            .saturating_add(1);
        if !self.render || completed > self.total {
            return;
        }
        if render_progress_line(&self.label, completed, self.total, self.no_color).is_err() {
            return;
        }
        if completed == self.total {
            drop(finish_progress_line());
        }
    }
}

fn render_progress_line(
    label: &str,
    current: usize,
    goal: usize,
    no_color: bool,
) -> Result<(), std::io::Error> {
    let (bar, percent_text, count_text) = build_progress_segments(current, goal);

    let mut out = std::io::stderr();
    queue!(
        out,
        cursor::MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(format!("{}: {}", label, bar))
    )?;
    if no_color {
        queue!(out, Print(&percent_text), Print(&count_text))?;
    } else {
        queue!(
            out,
            SetForegroundColor(Color::Cyan),
            Print(&percent_text),
            ResetColor,
            SetForegroundColor(Color::Yellow),
            Print(&count_text),
            ResetColor
        )?;
    }
    out.flush()?;
    Ok(())
}

fn finish_progress_line() -> Result<(), std::io::Error> {
    let mut out = std::io::stderr();
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Builds `[####----]`, ` 42.50%` and ` (17/40)` for the given counts.
pub(super) fn build_progress_segments(current: usize, goal: usize) -> (String, String, String) {
    let goal = goal.max(1);
    let current = current.min(goal);

    let current_u128 = u128::from(u64::try_from(current).unwrap_or(u64::MAX));
    let size_u128 = u128::from(u64::try_from(BAR_SIZE).unwrap_or(u64::MAX));
    let goal_u128 = u128::from(u64::try_from(goal).unwrap_or(u64::MAX));

    let scaled = current_u128
        .saturating_mul(size_u128)
        .checked_div(goal_u128)
        .unwrap_or(0);
    let complete_size = usize::try_from(scaled).unwrap_or(BAR_SIZE).min(BAR_SIZE);
    let incomplete_size = BAR_SIZE.saturating_sub(complete_size);

    let percent_x100 = current_u128
        .saturating_mul(10_000)
        .checked_div(goal_u128)
        .unwrap_or(0);
    let percent_whole = percent_x100.checked_div(100).unwrap_or(0);
    let percent_frac = percent_x100.checked_rem(100).unwrap_or(0);

    let bar = format!("[{}{}]", "#".repeat(complete_size), "-".repeat(incomplete_size));
    let percent_text = format!(" {}.{:02}%", percent_whole, percent_frac);
    let count_text = format!(" ({}/{})", current, goal);
    (bar, percent_text, count_text)
}
