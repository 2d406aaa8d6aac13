//! Suggestion popup drawn under a name field.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Popup listing the suggestions for one field.
pub struct SuggestionPopup<'a> {
    suggestions: &'a [String],
    highlighted: Option<usize>,
}

impl<'a> SuggestionPopup<'a> {
    pub fn new(suggestions: &'a [String], highlighted: Option<usize>) -> Self {
        Self {
            suggestions,
            highlighted,
        }
    }

    /// Popup rectangle under `input`, clipped to `screen`.
    ///
    /// Returns `None` when there is nothing to show or no room below.
    pub fn area(&self, input: Rect, screen: Rect) -> Option<Rect> {
        if self.suggestions.is_empty() {
            return None;
        }
        let y = input.bottom();
        let room = screen.bottom().saturating_sub(y);
        let height = (self.suggestions.len() as u16 + 2).min(room);
        (height > 2).then(|| Rect::new(input.x, y, input.width, height))
    }

    /// Rows holding suggestions inside a popup drawn at `area`.
    pub fn list_area(area: Rect) -> Rect {
        Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        )
    }
}

impl Widget for SuggestionPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, name) in self.suggestions.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.bottom() {
                break;
            }

            let style = if self.highlighted == Some(i) {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            for x in inner.left()..inner.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(style.bg.unwrap_or(Color::Reset));
                }
            }

            Paragraph::new(Line::from(Span::styled(name.as_str(), style)))
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}
