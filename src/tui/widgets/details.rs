//! Details panel for the hovered record.

use crate::data::BattedBall;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

fn or_na(value: Option<&str>) -> String {
    value.map_or_else(|| "N/A".to_string(), str::to_string)
}

/// Joins labelled values into one line, two spaces apart.
fn fields<'a>(pairs: Vec<(&'a str, String)>) -> Line<'a> {
    let mut spans = Vec::with_capacity(pairs.len() * 3);
    for (i, (label, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(label, Style::default().add_modifier(Modifier::BOLD)));
        spans.push(Span::raw(value));
    }
    Line::from(spans)
}

/// Lines describing one record, grouped to fit a short strip.
pub fn detail_lines(record: &BattedBall) -> Vec<Line<'_>> {
    let angle = record
        .launch_angle
        .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}°"));
    let speed = record
        .exit_speed
        .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2} mph"));
    let distance = record
        .hit_distance
        .map_or_else(|| "N/A".to_string(), |v| format!("{v:.0} ft"));

    let mut lines = vec![
        fields(vec![
            ("Batter: ", or_na(record.batter.as_deref())),
            ("Pitcher: ", or_na(record.pitcher.as_deref())),
        ]),
        fields(vec![
            ("Date: ", or_na(record.game_date.as_deref())),
            ("Outcome: ", or_na(record.play_outcome.as_deref())),
        ]),
        fields(vec![
            ("Launch Angle: ", angle),
            ("Exit Speed: ", speed),
            ("Distance: ", distance),
        ]),
    ];

    match &record.video_link {
        Some(link) => {
            lines.push(Line::from(Span::styled(
                link.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )));
            lines.push(Line::from(Span::styled(
                "Click the row or press Enter to watch",
                Style::default().fg(Color::DarkGray),
            )));
        }
        None => lines.push(fields(vec![("Video: ", "N/A".to_string())])),
    }
    lines
}

/// Details panel widget.
pub struct DetailsPanel<'a> {
    record: Option<&'a BattedBall>,
}

impl<'a> DetailsPanel<'a> {
    pub fn new(record: Option<&'a BattedBall>) -> Self {
        Self { record }
    }
}

impl Widget for DetailsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Details ");

        let lines = match self.record {
            Some(record) => detail_lines(record),
            None => vec![Line::from(Span::styled(
                "Hover over a record to see details.",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}
