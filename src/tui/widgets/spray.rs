//! Spray chart: where each batted ball landed, home plate at the origin,
//! drawn inside the walls of the selected ballpark.

use crate::data::{Ballpark, BattedBall, PlayOutcome};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Line, Points},
        Block, Borders, Widget,
    },
};

/// Segments in the drawn outfield wall.
const FENCE_STEPS: i32 = 24;

/// Outcomes in legend order with their marker colors.
const OUTCOME_COLORS: [(PlayOutcome, Color); 5] = [
    (PlayOutcome::HomeRun, Color::Red),
    (PlayOutcome::Triple, Color::Magenta),
    (PlayOutcome::Double, Color::Yellow),
    (PlayOutcome::Single, Color::Green),
    (PlayOutcome::Out, Color::Gray),
];

/// Groups plottable records by outcome color. Records without a landing
/// point are skipped; unknown outcomes are drawn white.
pub fn spray_points(records: &[BattedBall]) -> Vec<(Color, Vec<(f64, f64)>)> {
    let mut groups: Vec<(Color, Vec<(f64, f64)>)> = OUTCOME_COLORS
        .iter()
        .map(|(_, color)| (*color, Vec::new()))
        .chain(std::iter::once((Color::White, Vec::new())))
        .collect();

    for record in records {
        let Some(point) = record.spray_point() else {
            continue;
        };
        let slot = OUTCOME_COLORS
            .iter()
            .position(|(outcome, _)| outcome.matches(record.play_outcome.as_deref()))
            .unwrap_or(OUTCOME_COLORS.len());
        groups[slot].1.push(point);
    }

    groups.retain(|(_, points)| !points.is_empty());
    groups
}

/// Outfield wall from the left field pole to the right field pole.
pub fn fence_points(park: &Ballpark) -> Vec<(f64, f64)> {
    (0..=FENCE_STEPS)
        .map(|i| {
            let degrees = -45.0 + 90.0 * f64::from(i) / f64::from(FENCE_STEPS);
            let radius = park.fence_distance(degrees);
            let angle = degrees.to_radians();
            (radius * angle.sin(), radius * angle.cos())
        })
        .collect()
}

/// Spray chart widget.
pub struct SprayChart<'a> {
    records: &'a [BattedBall],
    park: &'a Ballpark,
}

impl<'a> SprayChart<'a> {
    pub fn new(records: &'a [BattedBall], park: &'a Ballpark) -> Self {
        Self { records, park }
    }
}

impl Widget for SprayChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let groups = spray_points(self.records);
        let plotted: usize = groups.iter().map(|(_, points)| points.len()).sum();

        let legend: Vec<Span> = OUTCOME_COLORS
            .iter()
            .flat_map(|(outcome, color)| {
                [
                    Span::styled("● ", Style::default().fg(*color)),
                    Span::raw(format!("{outcome}  ")),
                ]
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Spray Chart ({plotted} plotted) "))
            .title(TextLine::from(format!(" {} ^N/^P ", self.park.name)).right_aligned())
            .title_bottom(TextLine::from(legend));

        // The axes scale with the park's center field depth
        let depth = self.park.center_field;
        let fence = fence_points(self.park);

        Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([-depth * 1.1, depth * 1.1])
            .y_bounds([-20.0, depth * 1.15])
            .paint(|ctx| {
                if let (Some(left), Some(right)) = (fence.first(), fence.last()) {
                    ctx.draw(&Line::new(0.0, 0.0, left.0, left.1, Color::DarkGray));
                    ctx.draw(&Line::new(0.0, 0.0, right.0, right.1, Color::DarkGray));
                }
                for pair in fence.windows(2) {
                    ctx.draw(&Line::new(pair[0].0, pair[0].1, pair[1].0, pair[1].1, Color::DarkGray));
                }

                ctx.layer();
                for (color, coords) in &groups {
                    ctx.draw(&Points {
                        coords,
                        color: *color,
                    });
                }
            })
            .render(area, buf);
    }
}
