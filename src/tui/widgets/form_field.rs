//! Labelled form controls for the filter column.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Calculates the scroll offset needed to keep the cursor visible.
///
/// Returns the number of characters to skip from the start of the text.
pub fn calculate_scroll_offset(cursor: usize, available_width: usize) -> usize {
    if cursor <= available_width {
        0
    } else {
        cursor.saturating_sub(available_width)
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// A bordered single-line text input with its label in the title.
pub struct TextField<'a> {
    label: &'a str,
    text: &'a str,
    cursor: usize,
    focused: bool,
    placeholder: Option<&'a str>,
}

impl<'a> TextField<'a> {
    pub fn new(label: &'a str, text: &'a str, cursor: usize, focused: bool) -> Self {
        Self {
            label,
            text,
            cursor,
            focused,
            placeholder: None,
        }
    }

    /// Dimmed text shown while the field is empty.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Screen position of the cursor when drawn into `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let available = area.width.saturating_sub(3) as usize;
        let offset = calculate_scroll_offset(self.cursor, available);
        let column = (self.cursor - offset).min(available) as u16;
        (area.x + 1 + column, area.y + 1)
    }
}

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(self.focused))
            .title(format!(" {} ", self.label));

        // Borders (2) + cursor space (1)
        let available_width = area.width.saturating_sub(3) as usize;
        let scroll_offset = calculate_scroll_offset(self.cursor, available_width);

        let line = match self.placeholder {
            Some(placeholder) if self.text.is_empty() => Line::from(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray),
            )),
            _ => Line::from(self.text.chars().skip(scroll_offset).collect::<String>()),
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

/// A bordered choice control showing the current value between arrows.
pub struct ChoiceField<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
}

impl<'a> ChoiceField<'a> {
    pub fn new(label: &'a str, value: &'a str, focused: bool) -> Self {
        Self {
            label,
            value,
            focused,
        }
    }
}

impl Widget for ChoiceField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(self.focused))
            .title(format!(" {} ", self.label));

        let arrow = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled("◀ ", arrow),
            Span::styled(self.value, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" ▶", arrow),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

/// A bordered push button.
pub struct Button<'a> {
    label: &'a str,
    focused: bool,
    busy: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, focused: bool, busy: bool) -> Self {
        Self {
            label,
            focused,
            busy,
        }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(self.focused));

        let style = if self.focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        let label = if self.busy { "Loading..." } else { self.label };

        Paragraph::new(Line::from(Span::styled(format!(" {label} "), style)))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_scroll_offset_cursor_within_width() {
        assert_eq!(calculate_scroll_offset(5, 20), 0);
        assert_eq!(calculate_scroll_offset(20, 20), 0);
    }

    #[test]
    fn test_scroll_offset_cursor_beyond_width() {
        assert_eq!(calculate_scroll_offset(25, 20), 5);
        assert_eq!(calculate_scroll_offset(50, 20), 30);
    }

    #[test]
    fn test_text_field_renders_label_and_text() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TextField::new("Hitter", "judge", 5, true).render(area, &mut buf);
        assert!(line(&buf, 0).contains("Hitter"));
        assert!(line(&buf, 1).contains("judge"));
    }

    #[test]
    fn test_placeholder_only_when_empty() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TextField::new("Hitter", "", 0, false)
            .placeholder("type a name")
            .render(area, &mut buf);
        assert!(line(&buf, 1).contains("type a name"));
    }

    #[test]
    fn test_cursor_position_scrolls() {
        let field = TextField::new("Hitter", "abcdefghijklmnopqrstuvwxyz", 26, true);
        let (x, y) = field.cursor_position(Rect::new(0, 1, 13, 3));
        assert_eq!((x, y), (11, 2));
    }

    #[test]
    fn test_choice_and_button() {
        let area = Rect::new(0, 0, 24, 3);
        let mut buf = Buffer::empty(area);
        ChoiceField::new("Play Outcome", "HomeRun", false).render(area, &mut buf);
        assert!(line(&buf, 1).contains("HomeRun"));

        let mut buf = Buffer::empty(area);
        Button::new("Apply", true, true).render(area, &mut buf);
        assert!(line(&buf, 1).contains("Loading..."));
    }
}
