//! Batted-ball records table.
//!
//! Rows are drawn directly into the buffer so that the first data row sits at
//! a known offset; the app maps pointer rows back to records with it.

use crate::data::BattedBall;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

const NUMBER_WIDTH: usize = 6;
const OUTCOME_WIDTH: usize = 8;

/// Truncates a string to fit within the given width, adding ellipsis if needed.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    }
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

/// Records table widget.
pub struct RecordsTable<'a> {
    records: &'a [BattedBall],
    offset: usize,
    highlighted: Option<usize>,
    focused: bool,
}

impl<'a> RecordsTable<'a> {
    pub fn new(records: &'a [BattedBall], offset: usize, highlighted: Option<usize>, focused: bool) -> Self {
        Self {
            records,
            offset,
            highlighted,
            focused,
        }
    }

    /// Area holding data rows when the table is drawn at `area`.
    pub fn body_area(area: Rect) -> Rect {
        Rect::new(
            area.x + 1,
            area.y + 2,
            area.width.saturating_sub(2),
            area.height.saturating_sub(3),
        )
    }

    /// Scroll offset that keeps `highlighted` on screen.
    pub fn clamp_offset(offset: usize, highlighted: Option<usize>, visible: usize, total: usize) -> usize {
        let max_offset = total.saturating_sub(visible.max(1));
        let mut offset = offset.min(max_offset);
        if let Some(h) = highlighted {
            if h < offset {
                offset = h;
            } else if visible > 0 && h >= offset + visible {
                offset = h + 1 - visible;
            }
        }
        offset
    }

    fn column_widths(width: usize) -> [usize; 5] {
        // Five columns, four single-space gaps
        let fixed = NUMBER_WIDTH * 2 + OUTCOME_WIDTH + 4;
        let names = width.saturating_sub(fixed);
        let batter = names / 2;
        [batter, names - batter, NUMBER_WIDTH, NUMBER_WIDTH, OUTCOME_WIDTH]
    }

    fn format_row(cells: [String; 5], widths: &[usize; 5]) -> String {
        cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, &w))| {
                let cell = truncate(cell, w);
                if i == 2 || i == 3 {
                    format!("{cell:>w$}")
                } else {
                    format!("{cell:<w$}")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Widget for RecordsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Batted Balls ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let widths = Self::column_widths(inner.width as usize);
        let header = Self::format_row(
            [
                "Batter".to_string(),
                "Pitcher".to_string(),
                "EV".to_string(),
                "LA".to_string(),
                "Outcome".to_string(),
            ],
            &widths,
        );
        let header_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        buf.set_stringn(inner.x, inner.y, header, inner.width as usize, header_style);

        let body = Self::body_area(area);
        if self.records.is_empty() {
            buf.set_stringn(
                body.x,
                body.y,
                "No batted balls match these filters.",
                body.width as usize,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        for (row, (index, record)) in self
            .records
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(body.height as usize)
            .enumerate()
        {
            let y = body.y + row as u16;
            let text = Self::format_row(
                [
                    record.batter.clone().unwrap_or_default(),
                    record.pitcher.clone().unwrap_or_default(),
                    number(record.exit_speed),
                    number(record.launch_angle),
                    record.play_outcome.clone().unwrap_or_else(|| "-".to_string()),
                ],
                &widths,
            );
            let style = if self.highlighted == Some(index) {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            buf.set_stringn(body.x, y, format!("{text:<w$}", w = body.width as usize), body.width as usize, style);
        }
    }
}
