//! Heatmap of exit direction against launch angle.

use crate::data::BattedBall;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Bins along each axis.
pub const BINS: usize = 20;

/// Exit direction range in degrees, left field negative.
pub const DIRECTION_RANGE: (f64, f64) = (-45.0, 45.0);

/// Launch angle range in degrees.
pub const ANGLE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Low to high.
const RAMP: [Color; 5] = [Color::Blue, Color::Cyan, Color::Green, Color::Yellow, Color::Red];

/// Width of the launch angle labels left of the grid.
const LABEL_WIDTH: u16 = 4;

/// Bin holding `value`, or `None` outside the inclusive range. The upper
/// edge falls in the last bin.
pub fn bin_index(value: f64, (lo, hi): (f64, f64)) -> Option<usize> {
    if !(lo..=hi).contains(&value) {
        return None;
    }
    let step = (hi - lo) / BINS as f64;
    Some((((value - lo) / step).floor() as usize).min(BINS - 1))
}

/// Counts per bin, indexed `[angle_bin][direction_bin]` with bin 0 at the
/// low end of each range.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    counts: [[u32; BINS]; BINS],
    binned: usize,
}

impl HeatmapGrid {
    /// Bins every record with both a direction and an angle inside the
    /// ranges.
    pub fn from_records(records: &[BattedBall]) -> Self {
        let mut grid = Self {
            counts: [[0; BINS]; BINS],
            binned: 0,
        };
        for record in records {
            let (Some(direction), Some(angle)) = (record.exit_direction, record.launch_angle) else {
                continue;
            };
            if let (Some(col), Some(row)) = (
                bin_index(direction, DIRECTION_RANGE),
                bin_index(angle, ANGLE_RANGE),
            ) {
                grid.counts[row][col] += 1;
                grid.binned += 1;
            }
        }
        grid
    }

    pub fn count(&self, angle_bin: usize, direction_bin: usize) -> u32 {
        self.counts
            .get(angle_bin)
            .and_then(|row| row.get(direction_bin))
            .copied()
            .unwrap_or(0)
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Records that landed in a bin.
    pub fn binned(&self) -> usize {
        self.binned
    }
}

/// Ramp color for a count, `None` for empty bins.
pub fn heat_color(count: u32, max: u32) -> Option<Color> {
    if count == 0 || max == 0 {
        return None;
    }
    let step = (count as usize * RAMP.len()).div_ceil(max as usize);
    Some(RAMP[step.clamp(1, RAMP.len()) - 1])
}

/// Heatmap widget.
pub struct Heatmap<'a> {
    records: &'a [BattedBall],
}

impl<'a> Heatmap<'a> {
    pub fn new(records: &'a [BattedBall]) -> Self {
        Self { records }
    }
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = HeatmapGrid::from_records(self.records);
        let max = grid.max();
        let label_style = Style::default().fg(Color::DarkGray);

        let mut legend = vec![Span::raw(" 1 ")];
        legend.extend(RAMP.iter().map(|c| Span::styled("  ", Style::default().bg(*c))));
        legend.push(Span::raw(format!(" {} ", max.max(1))));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(label_style)
            .title(format!(
                " Heatmap: Exit Direction vs Launch Angle ({} binned) ",
                grid.binned()
            ))
            .title_bottom(Line::from(legend).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width <= LABEL_WIDTH || inner.height < 2 {
            return;
        }
        let plot = Rect::new(
            inner.x + LABEL_WIDTH,
            inner.y,
            inner.width - LABEL_WIDTH,
            inner.height - 1,
        );

        for dy in 0..plot.height {
            // Top row holds the highest launch angles
            let row = BINS - 1 - usize::from(dy) * BINS / usize::from(plot.height);
            for dx in 0..plot.width {
                let col = usize::from(dx) * BINS / usize::from(plot.width);
                let (symbol, style) = match heat_color(grid.count(row, col), max) {
                    Some(color) => (" ", Style::default().bg(color)),
                    None => ("·", label_style),
                };
                buf.set_string(plot.x + dx, plot.y + dy, symbol, style);
            }
        }

        let angle_labels = [(0, "90"), (plot.height / 2, "0"), (plot.height - 1, "-90")];
        for (dy, label) in angle_labels {
            buf.set_stringn(inner.x, plot.y + dy, label, usize::from(LABEL_WIDTH - 1), label_style);
        }

        let axis_y = plot.bottom();
        let width = plot.width;
        buf.set_string(plot.x, axis_y, "-45", label_style);
        buf.set_string(plot.x + width / 2, axis_y, "0", label_style);
        buf.set_string(plot.right().saturating_sub(2), axis_y, "45", label_style);
    }
}
