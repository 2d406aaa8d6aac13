//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components. Rendering also records
//! where clickable things were drawn, so it takes the app mutably.

use super::app::{App, Focus, ScreenRegions, Tab};
use super::widgets::{
    details::DetailsPanel,
    form_field::{Button, ChoiceField, TextField},
    header::Header,
    heatmap::Heatmap,
    records::RecordsTable,
    scatter::ScatterPlots,
    spray::SprayChart,
    suggestions::SuggestionPopup,
    toast::Toast,
};
use crate::suggest::Region;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Width of the filter form column.
pub const FORM_WIDTH: u16 = 32;

/// Rows taken by the details strip under the records table.
const DETAILS_HEIGHT: u16 = 7;

const README: &str = "\
bbviz explores batted-ball events: who hit the ball, who threw it, how hard and at what angle it left the bat, and what happened next.

Type in the Hitter or Pitcher field to get name suggestions. Suggestions come from a sorted roster searched with a binary search, so they stay instant on rosters of thousands of players. Use Up/Down and Enter, or click a suggestion. Clicking anywhere else closes the list.

Exit speed and launch angle bounds are inclusive. Press Enter or Apply to run the query.

In the records table, rest the pointer on a row to see its details, and click a row to open its video.

The spray chart is drawn inside the walls of a major league park; Ctrl+N and Ctrl+P pick the park. Scatter Plots compares launch angle with exit velocity and exit speed with distance. Heatmaps counts batted balls by exit direction and launch angle on a 20 by 20 grid.

Keys: Tab/Shift+Tab move focus, F1-F5 switch tabs, Esc closes suggestions, Ctrl+Q quits.";

pub(crate) fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let mut regions = ScreenRegions::default();

    // Main layout: header, body, footer
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Form + content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let header_area = main_layout[0];
    let body_area = main_layout[1];
    let footer_area = main_layout[2];

    let body_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(10)])
        .split(body_area);

    render_header(frame, header_area, app, &mut regions);
    render_form(frame, body_layout[0], app, &mut regions);
    match app.tab {
        Tab::AllBattedBalls => render_records(frame, body_layout[1], app, &mut regions),
        Tab::SprayChart => frame.render_widget(
            SprayChart::new(&app.records, app.ballpark()),
            body_layout[1],
        ),
        Tab::Readme => render_readme(frame, body_layout[1]),
        Tab::ScatterPlots => frame.render_widget(ScatterPlots::new(&app.records), body_layout[1]),
        Tab::Heatmaps => frame.render_widget(Heatmap::new(&app.records), body_layout[1]),
    }
    render_footer(frame, footer_area, app);

    // Popups go on top of everything else
    render_suggestions(frame, body_area, app, &mut regions);
    if let Some(message) = app.toast() {
        frame.render_widget(Toast::new(message), Toast::area(area));
    }

    app.regions = regions;
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, regions: &mut ScreenRegions) {
    regions.tabs = Header::tab_areas(area)
        .into_iter()
        .map(|(tab, rect)| (tab, region(rect)))
        .collect();
    let widget = Header::new(app.tab, app.records.len(), &app.source_label, app.is_loading);
    frame.render_widget(widget, area);
}

/// Renders the filter form, one three-row control per field.
fn render_form(frame: &mut Frame, area: Rect, app: &mut App, regions: &mut ScreenRegions) {
    let constraints: Vec<Constraint> = Focus::FORM
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (focus, rect) in Focus::FORM.into_iter().zip(rows.iter().copied()) {
        if rect.height == 0 {
            continue;
        }
        regions.fields.push((focus, region(rect)));
        let focused = app.focus == focus;

        match focus {
            Focus::Hitter | Focus::Pitcher => {
                let Some(dropdown) = app.form.dropdown_mut(focus) else {
                    continue;
                };
                dropdown.set_region(region(rect));
                let input = dropdown.input();
                let field = TextField::new(focus.label(), &input.text, input.cursor, focused)
                    .placeholder("Start typing a name");
                if focused {
                    frame.set_cursor_position(field.cursor_position(rect));
                }
                frame.render_widget(field, rect);
            }
            Focus::PlayOutcome => {
                let value = app.form.play_outcome.as_str();
                frame.render_widget(ChoiceField::new(focus.label(), value, focused), rect);
            }
            Focus::Apply => {
                frame.render_widget(Button::new(focus.label(), focused, app.is_loading), rect);
            }
            _ => {
                let Some(input) = app.form.numeric(focus) else {
                    continue;
                };
                let field = TextField::new(focus.label(), &input.text, input.cursor, focused);
                if focused {
                    frame.set_cursor_position(field.cursor_position(rect));
                }
                frame.render_widget(field, rect);
            }
        }
    }
}

/// Renders the records table with the details strip under it.
fn render_records(frame: &mut Frame, area: Rect, app: &mut App, regions: &mut ScreenRegions) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(DETAILS_HEIGHT)])
        .split(area);

    let body = RecordsTable::body_area(layout[0]);
    app.records_scroll = RecordsTable::clamp_offset(
        app.records_scroll,
        app.hovered,
        body.height as usize,
        app.records.len(),
    );
    regions.records = Some(region(body));
    regions.records_offset = app.records_scroll;

    let table = RecordsTable::new(
        &app.records,
        app.records_scroll,
        app.hovered,
        app.focus == Focus::Records,
    );
    frame.render_widget(table, layout[0]);
    frame.render_widget(DetailsPanel::new(app.hovered_record()), layout[1]);
}

fn render_readme(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" README ");
    let paragraph = Paragraph::new(README).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hint_style = Style::default().fg(Color::DarkGray);
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" Tab", key_style),
        Span::styled(" focus  ", hint_style),
        Span::styled("Enter", key_style),
        Span::styled(" apply/select  ", hint_style),
        Span::styled("Esc", key_style),
        Span::styled(" close  ", hint_style),
        Span::styled("F1-F5", key_style),
        Span::styled(" tabs  ", hint_style),
        Span::styled("^Q", key_style),
        Span::styled(" quit ", hint_style),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::styled(format!("│ {status}"), Style::default().fg(Color::White)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draws the suggestion list of any open name field under its input.
fn render_suggestions(frame: &mut Frame, bounds: Rect, app: &mut App, regions: &mut ScreenRegions) {
    for focus in [Focus::Hitter, Focus::Pitcher] {
        let Some(input_region) = regions
            .fields
            .iter()
            .find(|(f, _)| *f == focus)
            .map(|(_, r)| *r)
        else {
            continue;
        };
        let Some(dropdown) = app.form.dropdown_mut(focus) else {
            continue;
        };

        let input = Rect::new(
            input_region.x,
            input_region.y,
            input_region.width,
            input_region.height,
        );
        let popup = SuggestionPopup::new(dropdown.visible_suggestions(), dropdown.highlighted());
        let Some(popup_area) = popup.area(input, bounds) else {
            continue;
        };
        frame.render_widget(popup, popup_area);

        dropdown.set_region(input_region.union(&region(popup_area)));
        regions.popup = Some((focus, region(SuggestionPopup::list_area(popup_area))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_records;
    use crate::roster::Roster;
    use crate::suggest::NameIndex;
    use crate::tui::AsyncMessage;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        let (tx, _rx) = mpsc::channel::<AsyncMessage>(8);
        let roster = Roster {
            hitters: NameIndex::build(["Abreu, Jose", "Adell, Jo", "Soto, Juan"]),
            pitchers: NameIndex::build(["Cole, Gerrit"]),
        };
        App::new(&roster, "mock", Duration::from_millis(100), tx)
    }

    #[test]
    fn test_render_records_regions() {
        let mut app = app();
        app.handle_async(AsyncMessage::DataLoaded(Ok(sample_records())));
        let screen = draw(&mut app);

        assert!(screen.contains("Judge, Aaron"));
        assert!(screen.contains("Hover over a record to see details."));
        assert_eq!(app.regions.fields.len(), 8);
        assert_eq!(app.regions.fields[0], (Focus::Hitter, Region::new(0, 1, 32, 3)));
        assert_eq!(app.regions.fields[7].1, Region::new(0, 22, 32, 3));
        assert_eq!(app.regions.records.map(|r| (r.x, r.y)), Some((33, 3)));
        assert_eq!(app.regions.tabs.len(), 5);
    }

    #[test]
    fn test_render_open_popup_records_region() {
        let mut app = app();
        app.form.hitter.set_text("a");
        let screen = draw(&mut app);

        assert!(screen.contains("abreu, jose"));
        assert!(screen.contains("adell, jo"));
        assert_eq!(app.regions.popup, Some((Focus::Hitter, Region::new(1, 5, 30, 2))));
        assert_eq!(app.form.hitter.region(), Region::new(0, 1, 32, 7));
    }

    #[test]
    fn test_closed_popup_is_not_drawn() {
        let mut app = app();
        app.form.hitter.set_text("a");
        app.form.hitter.close();
        let screen = draw(&mut app);
        assert!(!screen.contains("abreu, jose"));
        assert_eq!(app.regions.popup, None);
    }

    #[test]
    fn test_render_other_tabs() {
        let mut app = app();
        app.set_tab(Tab::Readme);
        assert!(draw(&mut app).contains("bbviz explores"));
        assert_eq!(app.regions.records, None);

        app.set_tab(Tab::SprayChart);
        assert!(draw(&mut app).contains("Spray Chart (0 plotted)"));
        assert!(draw(&mut app).contains("Truist Park (Braves)"));

        app.handle_async(AsyncMessage::DataLoaded(Ok(sample_records())));
        app.set_tab(Tab::ScatterPlots);
        let screen = draw(&mut app);
        assert!(screen.contains("Launch Angle vs Exit Velocity (13)"));
        assert!(screen.contains("Exit Speed vs Hit Distance (13)"));
        assert_eq!(app.regions.records, None);

        app.set_tab(Tab::Heatmaps);
        assert!(draw(&mut app).contains("(13 binned)"));
    }
}
