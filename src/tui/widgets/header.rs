//! Header widget for the TUI.
//!
//! Displays the application name, the content tabs, the record count and the
//! data source.

use crate::tui::app::Tab;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

fn title() -> String {
    format!(" bbviz v{} ", env!("CARGO_PKG_VERSION"))
}

fn tab_label(index: usize, tab: Tab) -> String {
    format!(" F{} {} ", index + 1, tab.title())
}

/// Header bar widget.
pub struct Header<'a> {
    active: Tab,
    record_count: usize,
    source: &'a str,
    is_loading: bool,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    pub fn new(active: Tab, record_count: usize, source: &'a str, is_loading: bool) -> Self {
        Self {
            active,
            record_count,
            source,
            is_loading,
        }
    }

    /// Where each tab label is drawn inside `area`. Tabs that do not fit are
    /// left out.
    pub fn tab_areas(area: Rect) -> Vec<(Tab, Rect)> {
        let mut x = area.x + title().chars().count() as u16 + 1;
        let mut areas = Vec::new();
        for (i, tab) in Tab::ALL.into_iter().enumerate() {
            let width = tab_label(i, tab).chars().count() as u16;
            if x + width > area.right() {
                break;
            }
            areas.push((tab, Rect::new(x, area.y, width, 1)));
            x += width + 1;
        }
        areas
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_style(style);
            }
        }

        let left_span = Span::styled(title(), style);
        buf.set_span(area.x, area.y, &left_span, area.width);

        for (i, (tab, tab_area)) in Self::tab_areas(area).into_iter().enumerate() {
            let tab_style = if tab == self.active {
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().bg(Color::Blue).fg(Color::Gray)
            };
            buf.set_string(tab_area.x, tab_area.y, tab_label(i, tab), tab_style);
        }

        // Right side: loading marker, record count and source
        let marker = if self.is_loading { "⟳ " } else { "" };
        let right_text = format!(" {marker}{} records [{}] ", self.record_count, self.source);
        let right_width = right_text.chars().count() as u16;
        let tabs_end = Self::tab_areas(area)
            .last()
            .map_or(area.x, |(_, r)| r.right());
        if area.right().saturating_sub(right_width) > tabs_end {
            let right_x = area.right() - right_width;
            buf.set_string(right_x, area.y, &right_text, style);
            if self.is_loading {
                let loading_style = Style::default().bg(Color::Blue).fg(Color::Yellow);
                buf.set_string(right_x + 1, area.y, "⟳", loading_style);
            }
        }
    }
}
