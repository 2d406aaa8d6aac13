//! Scatter plots: launch angle against exit velocity, and exit speed against
//! hit distance.

use crate::data::BattedBall;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

/// Points for both plots. A record is plotted only when launch angle, exit
/// speed and hit distance are all present, so both plots show the same
/// records.
#[derive(Debug, Default, PartialEq)]
pub struct ScatterSeries {
    /// (launch angle, exit speed)
    pub angle_speed: Vec<(f64, f64)>,
    /// (exit speed, hit distance)
    pub speed_distance: Vec<(f64, f64)>,
}

pub fn scatter_series(records: &[BattedBall]) -> ScatterSeries {
    let mut series = ScatterSeries::default();
    for record in records {
        let (Some(angle), Some(speed), Some(distance)) =
            (record.launch_angle, record.exit_speed, record.hit_distance)
        else {
            continue;
        };
        series.angle_speed.push((angle, speed));
        series.speed_distance.push((speed, distance));
    }
    series
}

/// Axis bounds covering every value with 5% padding. Falls back to
/// `fallback` when there is nothing to cover.
pub fn axis_bounds(values: impl Iterator<Item = f64>, fallback: [f64; 2]) -> [f64; 2] {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        return fallback;
    }
    let pad = ((max - min) * 0.05).max(1.0);
    [min - pad, max + pad]
}

fn labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::raw(format!("{v:.0}")))
        .collect()
}

struct Plot<'a> {
    title: String,
    points: &'a [(f64, f64)],
    color: Color,
    x_title: &'static str,
    y_title: &'static str,
    x_fallback: [f64; 2],
    y_fallback: [f64; 2],
}

impl Plot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let x_bounds = axis_bounds(self.points.iter().map(|p| p.0), self.x_fallback);
        let y_bounds = axis_bounds(self.points.iter().map(|p| p.1), self.y_fallback);
        let axis_style = Style::default().fg(Color::DarkGray);

        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(self.color))
            .data(self.points);

        Chart::new(vec![dataset])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(axis_style)
                    .title(self.title),
            )
            .x_axis(
                Axis::default()
                    .title(self.x_title)
                    .style(axis_style)
                    .bounds(x_bounds)
                    .labels(labels(x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title(self.y_title)
                    .style(axis_style)
                    .bounds(y_bounds)
                    .labels(labels(y_bounds)),
            )
            .render(area, buf);
    }
}

/// Two stacked scatter plots over the current records.
pub struct ScatterPlots<'a> {
    records: &'a [BattedBall],
}

impl<'a> ScatterPlots<'a> {
    pub fn new(records: &'a [BattedBall]) -> Self {
        Self { records }
    }
}

impl Widget for ScatterPlots<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let series = scatter_series(self.records);
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Plot {
            title: format!(" Launch Angle vs Exit Velocity ({}) ", series.angle_speed.len()),
            points: &series.angle_speed,
            color: Color::LightRed,
            x_title: "Launch Angle (°)",
            y_title: "Exit Velocity (mph)",
            x_fallback: [-90.0, 90.0],
            y_fallback: [0.0, 120.0],
        }
        .render(halves[0], buf);

        Plot {
            title: format!(" Exit Speed vs Hit Distance ({}) ", series.speed_distance.len()),
            points: &series.speed_distance,
            color: Color::LightBlue,
            x_title: "Exit Speed (mph)",
            y_title: "Hit Distance (ft)",
            x_fallback: [0.0, 120.0],
            y_fallback: [0.0, 450.0],
        }
        .render(halves[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_records;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_series_skip_incomplete_records() {
        let records = vec![
            BattedBall {
                launch_angle: Some(28.4),
                exit_speed: Some(112.3),
                hit_distance: Some(421.0),
                ..Default::default()
            },
            BattedBall {
                launch_angle: Some(10.0),
                exit_speed: Some(90.0),
                hit_distance: None,
                ..Default::default()
            },
        ];
        let series = scatter_series(&records);
        assert_eq!(series.angle_speed, vec![(28.4, 112.3)]);
        assert_eq!(series.speed_distance, vec![(112.3, 421.0)]);
    }

    #[test]
    fn test_sample_series_sizes() {
        let series = scatter_series(&sample_records());
        assert_eq!(series.angle_speed.len(), 13);
        assert_eq!(series.speed_distance.len(), 13);
    }

    #[test]
    fn test_axis_bounds() {
        assert_eq!(axis_bounds([0.0, 100.0].into_iter(), [1.0, 2.0]), [-5.0, 105.0]);
        assert_eq!(axis_bounds(std::iter::empty(), [1.0, 2.0]), [1.0, 2.0]);
        assert_eq!(axis_bounds([50.0].into_iter(), [1.0, 2.0]), [49.0, 51.0]);
        assert_eq!(axis_bounds([f64::NAN].into_iter(), [1.0, 2.0]), [1.0, 2.0]);
    }

    #[test]
    fn test_render_titles() {
        let records = sample_records();
        let area = Rect::new(0, 0, 66, 26);
        let mut buf = Buffer::empty(area);
        ScatterPlots::new(&records).render(area, &mut buf);
        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .filter_map(|pos| buf.cell(pos).map(|c| c.symbol().to_string()))
            .collect();
        assert!(screen.contains("Launch Angle vs Exit Velocity (13)"));
        assert!(screen.contains("Exit Speed vs Hit Distance (13)"));
    }

    #[test]
    fn test_render_empty_does_not_panic() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        ScatterPlots::new(&[]).render(area, &mut buf);
    }
}
