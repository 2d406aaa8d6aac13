//! Output formatting for headless mode.
//!
//! Text prints the final screen, JSON adds the dashboard state, and frames
//! prints every captured screen with a one-line state summary under it.

use super::{Frame, HeadlessResult, HeadlessState};
pub use crate::cli::OutputFormat;
use ratatui::buffer::Buffer;
use serde::Serialize;

/// Renders a ratatui buffer to a string.
pub struct ScreenRenderer;

impl ScreenRenderer {
    /// Renders a buffer to text, one line per row. Trailing spaces and
    /// trailing blank rows are dropped.
    pub fn render(buffer: &Buffer) -> String {
        let area = buffer.area;
        if area.height == 0 {
            return String::new();
        }

        let rows: Vec<String> = (area.top()..area.bottom())
            .map(|y| {
                let row: String = (area.left()..area.right())
                    .filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol()))
                    .collect();
                row.trim_end().to_string()
            })
            .collect();

        let used = rows.iter().rposition(|row| !row.is_empty()).map_or(1, |i| i + 1);
        let mut screen = rows[..used].join("\n");
        screen.push('\n');
        screen
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    screen: &'a str,
    screen_lines: &'a [String],
    events_executed: usize,
    duration_ms: u64,
    assertions: AssertionSummary<'a>,
    state: &'a HeadlessState,
}

#[derive(Serialize)]
struct AssertionSummary<'a> {
    passed: usize,
    failed: usize,
    failures: &'a [String],
}

/// Formats headless execution results.
pub struct HeadlessOutput {
    format: OutputFormat,
}

impl HeadlessOutput {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, result: &HeadlessResult) -> String {
        match self.format {
            OutputFormat::Text => format!("{}\n{}", result.screen, footer(result)),
            OutputFormat::Json => json(result),
            OutputFormat::Frames => {
                let mut out: String = result.frames.iter().map(frame_block).collect();
                out.push_str(&format!("Total: {} frames\n", result.frames.len()));
                out.push_str(&footer(result));
                out
            }
        }
    }
}

/// Event count, timing, assertion totals and every failed assertion.
fn footer(result: &HeadlessResult) -> String {
    let mut out = format!(
        "Events: {} executed in {}ms",
        result.events_executed,
        result.duration.as_millis()
    );
    if result.assertions_passed + result.assertions_failed > 0 {
        out.push_str(&format!(
            " | Assertions: {} passed, {} failed",
            result.assertions_passed, result.assertions_failed
        ));
    }
    out.push('\n');
    for failure in &result.failures {
        out.push_str(&format!("FAILED: {failure}\n"));
    }
    out
}

fn frame_block(frame: &Frame) -> String {
    format!(
        "--- frame {}: {} ---\n{}[{}]\n\n",
        frame.number,
        frame.event.as_deref().unwrap_or("initial"),
        frame.screen,
        frame.state.summary()
    )
}

fn json(result: &HeadlessResult) -> String {
    let output = JsonOutput {
        screen: &result.screen,
        screen_lines: &result.screen_lines,
        events_executed: result.events_executed,
        duration_ms: u64::try_from(result.duration.as_millis()).unwrap_or(u64::MAX),
        assertions: AssertionSummary {
            passed: result.assertions_passed,
            failed: result.assertions_failed,
            failures: &result.failures,
        },
        state: &result.state,
    };

    serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {e}\"}}"))
}
