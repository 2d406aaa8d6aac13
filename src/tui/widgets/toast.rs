//! Toast notification widget for the TUI.
//!
//! Displays temporary messages that auto-dismiss.

use super::records::truncate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Toast notification widget.
pub struct Toast<'a> {
    message: &'a str,
}

impl<'a> Toast<'a> {
    /// Creates a new toast widget.
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Calculates the area for the toast (bottom-right corner, above the footer).
    pub fn area(screen: Rect) -> Rect {
        let width = 40.min(screen.width.saturating_sub(4));
        let height = 3.min(screen.height);
        let x = screen.width.saturating_sub(width + 2);
        let y = screen.height.saturating_sub(height + 1);
        Rect::new(x, y, width, height)
    }
}

impl Widget for Toast<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(Span::styled(
            truncate(self.message, inner.width as usize),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        Paragraph::new(line).render(inner, buf);
    }
}
