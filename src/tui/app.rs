//! Application state for the TUI.
//!
//! Contains the main App struct and related types for managing UI state.
//! Input handling returns an [`AppAction`] for anything that needs I/O, so
//! the interactive and headless runners decide how fetches and links run.

use super::events::Event;
use super::form::FilterForm;
use super::AsyncMessage;
use crate::data::{Ballpark, BattedBall, FilterParams, BALLPARKS};
use crate::roster::Roster;
use crate::suggest::{Debouncer, InteractionHub, InteractionTarget, Region};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Content tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    AllBattedBalls,
    SprayChart,
    Readme,
    ScatterPlots,
    Heatmaps,
}

impl Tab {
    /// Tabs in header order; F1 selects the first.
    pub const ALL: [Tab; 5] = [
        Self::AllBattedBalls,
        Self::SprayChart,
        Self::Readme,
        Self::ScatterPlots,
        Self::Heatmaps,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::AllBattedBalls => "All Batted Balls",
            Self::SprayChart => "Spray Chart",
            Self::Readme => "README",
            Self::ScatterPlots => "Scatter Plots",
            Self::Heatmaps => "Heatmaps",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllBattedBalls => "all_batted_balls",
            Self::SprayChart => "spray_chart",
            Self::Readme => "readme",
            Self::ScatterPlots => "scatter_plots",
            Self::Heatmaps => "heatmaps",
        }
    }
}

/// Which control currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Hitter,
    Pitcher,
    MinExitSpeed,
    MaxExitSpeed,
    MinLaunchAngle,
    MaxLaunchAngle,
    PlayOutcome,
    Apply,
    Records,
}

impl Focus {
    /// Focus order for Tab / Shift+Tab.
    pub const ORDER: [Focus; 9] = [
        Self::Hitter,
        Self::Pitcher,
        Self::MinExitSpeed,
        Self::MaxExitSpeed,
        Self::MinLaunchAngle,
        Self::MaxLaunchAngle,
        Self::PlayOutcome,
        Self::Apply,
        Self::Records,
    ];

    /// Form controls, top to bottom.
    pub const FORM: [Focus; 8] = [
        Self::Hitter,
        Self::Pitcher,
        Self::MinExitSpeed,
        Self::MaxExitSpeed,
        Self::MinLaunchAngle,
        Self::MaxLaunchAngle,
        Self::PlayOutcome,
        Self::Apply,
    ];

    /// Cycles to the next control.
    pub fn next(self) -> Self {
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(pos + 1) % Self::ORDER.len()]
    }

    /// Cycles to the previous control.
    pub fn prev(self) -> Self {
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(pos + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Field label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hitter => "Hitter",
            Self::Pitcher => "Pitcher",
            Self::MinExitSpeed => "Min Exit Speed",
            Self::MaxExitSpeed => "Max Exit Speed",
            Self::MinLaunchAngle => "Min Launch Angle",
            Self::MaxLaunchAngle => "Max Launch Angle",
            Self::PlayOutcome => "Play Outcome",
            Self::Apply => "Apply",
            Self::Records => "Records",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hitter => "hitter",
            Self::Pitcher => "pitcher",
            Self::MinExitSpeed => "min_exit_speed",
            Self::MaxExitSpeed => "max_exit_speed",
            Self::MinLaunchAngle => "min_launch_angle",
            Self::MaxLaunchAngle => "max_launch_angle",
            Self::PlayOutcome => "play_outcome",
            Self::Apply => "apply",
            Self::Records => "records",
        }
    }

    pub fn is_name_field(&self) -> bool {
        matches!(self, Self::Hitter | Self::Pitcher)
    }
}

/// Work the runner must do after an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    None,
    /// Query the data source with these filters.
    Fetch(FilterParams),
    /// Open a record's video link.
    OpenLink(String),
}

/// Where things were drawn on the last frame. Rebuilt on every render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenRegions {
    pub tabs: Vec<(Tab, Region)>,
    pub fields: Vec<(Focus, Region)>,
    /// Suggestion rows of the open popup, one row per suggestion.
    pub popup: Option<(Focus, Region)>,
    /// Data rows of the records table.
    pub records: Option<Region>,
    /// Index of the record drawn on the first data row.
    pub records_offset: usize,
}

impl ScreenRegions {
    fn tab_at(&self, column: u16, row: u16) -> Option<Tab> {
        self.tabs
            .iter()
            .find(|(_, region)| region.contains(column, row))
            .map(|(tab, _)| *tab)
    }

    fn field_at(&self, column: u16, row: u16) -> Option<Focus> {
        self.fields
            .iter()
            .find(|(_, region)| region.contains(column, row))
            .map(|(focus, _)| *focus)
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    pub focus: Focus,
    pub tab: Tab,
    pub form: FilterForm,
    /// Records returned by the last query.
    pub records: Vec<BattedBall>,
    /// Record shown in the details panel.
    pub hovered: Option<usize>,
    /// First visible record row.
    pub records_scroll: usize,
    pub is_loading: bool,
    /// Footer status text.
    pub status: Option<String>,
    /// Last link opened, for display and scripted checks.
    pub last_link: Option<String>,
    /// Data source description for the header.
    pub source_label: String,
    pub regions: ScreenRegions,
    /// Index into [`BALLPARKS`] for the spray chart.
    ballpark: usize,
    toast: Option<(String, Instant)>,
    /// Record under the pointer; becomes `hovered` once the pointer settles.
    hover_target: Option<usize>,
    hover: Debouncer,
    hover_delay: Duration,
    hub: InteractionHub,
    tx: mpsc::Sender<AsyncMessage>,
}

impl App {
    /// Creates the app with both name fields mounted and closed.
    pub fn new(
        roster: &Roster,
        source_label: impl Into<String>,
        hover_delay: Duration,
        tx: mpsc::Sender<AsyncMessage>,
    ) -> Self {
        let hub = InteractionHub::new();
        let form = FilterForm::new(roster, &hub);

        Self {
            running: true,
            focus: Focus::default(),
            tab: Tab::default(),
            form,
            records: Vec::new(),
            hovered: None,
            records_scroll: 0,
            is_loading: false,
            status: None,
            last_link: None,
            source_label: source_label.into(),
            regions: ScreenRegions::default(),
            ballpark: 0,
            toast: None,
            hover_target: None,
            hover: Debouncer::new(),
            hover_delay,
            hub,
            tx,
        }
    }

    /// Number of live interaction listeners.
    pub fn listener_count(&self) -> usize {
        self.hub.listener_count()
    }

    /// Record shown in the details panel.
    pub fn hovered_record(&self) -> Option<&BattedBall> {
        self.hovered.and_then(|i| self.records.get(i))
    }

    /// Returns true while a hover is waiting for the pointer to settle.
    pub fn hover_pending(&self) -> bool {
        self.hover.is_pending()
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|(msg, _)| msg.as_str())
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now()));
    }

    /// Clears the toast once it has been shown long enough.
    pub fn clear_expired_toast(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|(_, shown)| shown.elapsed() >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    /// Marks a query as in flight and returns its filters.
    pub fn begin_fetch(&mut self) -> AppAction {
        let params = self.form.params();
        info!(?params, "Applying filters");
        self.is_loading = true;
        self.status = Some("Loading...".to_string());
        AppAction::Fetch(params)
    }

    /// Handles an event and updates application state.
    pub fn handle_event(&mut self, event: Event) -> AppAction {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => AppAction::None,
            Event::Tick => {
                self.clear_expired_toast();
                AppAction::None
            }
        }
    }

    /// Applies a message from a background task.
    pub fn handle_async(&mut self, msg: AsyncMessage) {
        match msg {
            AsyncMessage::DataLoaded(Ok(records)) => {
                info!(count = records.len(), "Records loaded");
                self.status = Some(format!("{} records", records.len()));
                self.records = records;
                self.is_loading = false;
                self.records_scroll = 0;
                self.clear_hover();
            }
            AsyncMessage::DataLoaded(Err(e)) => {
                warn!("Query failed: {e}");
                self.is_loading = false;
                self.status = Some(format!("{}: {e}", e.category()));
                self.show_toast(format!("Query failed ({})", e.category()));
            }
            AsyncMessage::HoverSettled(index) => {
                // A settle for a row the pointer already left is stale.
                if index == self.hover_target {
                    self.hovered = index.filter(|i| *i < self.records.len());
                    debug!(hovered = ?self.hovered, "Hover settled");
                }
            }
        }
    }

    /// Moves keyboard focus, telling open dropdowns where it went.
    pub fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus {
            return;
        }

        let target = match self.form.dropdown(focus) {
            Some(dropdown) => InteractionTarget::Subscriber(dropdown.id()),
            None => InteractionTarget::Elsewhere,
        };
        self.hub.publish(target);
        self.form.pump_interactions();

        self.focus = focus;
        if let Some(dropdown) = self.form.dropdown_mut(focus) {
            dropdown.focus();
        }
    }

    /// Park the spray chart is drawn for.
    pub fn ballpark(&self) -> &'static Ballpark {
        &BALLPARKS[self.ballpark % BALLPARKS.len()]
    }

    /// Selects a park by index. Out-of-range indexes wrap.
    pub fn set_ballpark(&mut self, index: usize) {
        self.ballpark = index % BALLPARKS.len();
        debug!(ballpark = self.ballpark().name, "Ballpark selected");
    }

    /// Steps to the next or previous park, wrapping at either end.
    pub fn cycle_ballpark(&mut self, forward: bool) {
        let step = if forward { 1 } else { BALLPARKS.len() - 1 };
        self.set_ballpark(self.ballpark + step);
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if tab != self.tab {
            debug!(tab = tab.as_str(), "Switching tab");
            self.tab = tab;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind == KeyEventKind::Release {
            return AppAction::None;
        }

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.running = false;
                return AppAction::None;
            }
            KeyCode::F(n @ 1..=5) => {
                self.set_tab(Tab::ALL[usize::from(n - 1)]);
                return AppAction::None;
            }
            KeyCode::Char(c @ ('n' | 'p'))
                if key.modifiers.contains(KeyModifiers::CONTROL) && self.tab == Tab::SprayChart =>
            {
                self.cycle_ballpark(c == 'n');
                return AppAction::None;
            }
            KeyCode::Tab => {
                self.set_focus(self.focus.next());
                return AppAction::None;
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.prev());
                return AppAction::None;
            }
            KeyCode::Esc => {
                if let Some(dropdown) = self.form.dropdown_mut(self.focus) {
                    dropdown.close();
                }
                return AppAction::None;
            }
            // Unbound shortcuts never type into a field
            KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                return AppAction::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Hitter | Focus::Pitcher => self.handle_name_key(key),
            Focus::MinExitSpeed
            | Focus::MaxExitSpeed
            | Focus::MinLaunchAngle
            | Focus::MaxLaunchAngle => self.handle_numeric_key(key),
            Focus::PlayOutcome => match key.code {
                KeyCode::Left => {
                    self.form.play_outcome = self.form.play_outcome.prev();
                    AppAction::None
                }
                KeyCode::Right | KeyCode::Char(' ') => {
                    self.form.play_outcome = self.form.play_outcome.next();
                    AppAction::None
                }
                KeyCode::Enter => self.begin_fetch(),
                _ => AppAction::None,
            },
            Focus::Apply => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.begin_fetch(),
                _ => AppAction::None,
            },
            Focus::Records => self.handle_records_key(key),
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) -> AppAction {
        let Some(dropdown) = self.form.dropdown_mut(self.focus) else {
            return AppAction::None;
        };

        match key.code {
            KeyCode::Char(c) => dropdown.insert(c),
            KeyCode::Backspace => dropdown.backspace(),
            KeyCode::Delete => dropdown.delete(),
            KeyCode::Left => dropdown.move_left(),
            KeyCode::Right => dropdown.move_right(),
            KeyCode::Home => dropdown.move_home(),
            KeyCode::End => dropdown.move_end(),
            KeyCode::Down => dropdown.highlight_next(),
            KeyCode::Up => dropdown.highlight_previous(),
            KeyCode::Enter => {
                if !dropdown.select_highlighted() {
                    dropdown.close();
                    return self.begin_fetch();
                }
            }
            _ => {}
        }
        AppAction::None
    }

    fn handle_numeric_key(&mut self, key: KeyEvent) -> AppAction {
        if key.code == KeyCode::Enter {
            return self.begin_fetch();
        }
        let Some(input) = self.form.numeric_mut(self.focus) else {
            return AppAction::None;
        };

        match key.code {
            KeyCode::Char(c) => input.insert(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            _ => {}
        }
        AppAction::None
    }

    fn handle_records_key(&mut self, key: KeyEvent) -> AppAction {
        if self.records.is_empty() {
            return AppAction::None;
        }
        let last = self.records.len() - 1;

        let selected = match key.code {
            KeyCode::Down => self.hovered.map_or(0, |i| (i + 1).min(last)),
            KeyCode::Up => self.hovered.map_or(0, |i| i.saturating_sub(1)),
            KeyCode::PageDown => self.hovered.map_or(0, |i| (i + 10).min(last)),
            KeyCode::PageUp => self.hovered.map_or(0, |i| i.saturating_sub(10)),
            KeyCode::Home => 0,
            KeyCode::End => last,
            KeyCode::Enter => {
                return match self.hovered {
                    Some(i) => self.open_record(i),
                    None => AppAction::None,
                };
            }
            _ => return AppAction::None,
        };

        self.hover.cancel();
        self.hover_target = Some(selected);
        self.hovered = Some(selected);
        AppAction::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> AppAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer_moved(mouse.column, mouse.row);
                AppAction::None
            }
            MouseEventKind::ScrollDown if self.tab == Tab::AllBattedBalls => {
                if self.records_scroll + 1 < self.records.len() {
                    self.records_scroll += 1;
                }
                AppAction::None
            }
            MouseEventKind::ScrollUp if self.tab == Tab::AllBattedBalls => {
                self.records_scroll = self.records_scroll.saturating_sub(1);
                AppAction::None
            }
            _ => AppAction::None,
        }
    }

    /// A pointer press: every dropdown hears about it before anything else
    /// reacts.
    fn click(&mut self, column: u16, row: u16) -> AppAction {
        self.hub.publish(InteractionTarget::Point { column, row });
        self.form.pump_interactions();

        if let Some((focus, area)) = self.regions.popup {
            if area.contains(column, row) {
                if let Some(dropdown) = self.form.dropdown_mut(focus) {
                    if dropdown.is_open() {
                        dropdown.select_at(usize::from(row - area.y));
                        return AppAction::None;
                    }
                }
            }
        }

        if let Some(tab) = self.regions.tab_at(column, row) {
            self.set_tab(tab);
            return AppAction::None;
        }

        if let Some(focus) = self.regions.field_at(column, row) {
            self.focus = focus;
            return match focus {
                Focus::Hitter | Focus::Pitcher => {
                    if let Some(dropdown) = self.form.dropdown_mut(focus) {
                        dropdown.focus();
                    }
                    AppAction::None
                }
                Focus::PlayOutcome => {
                    self.form.play_outcome = self.form.play_outcome.next();
                    AppAction::None
                }
                Focus::Apply => self.begin_fetch(),
                _ => AppAction::None,
            };
        }

        if let Some(index) = self.record_at(column, row) {
            self.focus = Focus::Records;
            self.hover.cancel();
            self.hover_target = Some(index);
            self.hovered = Some(index);
            return self.open_record(index);
        }

        AppAction::None
    }

    /// Pointer movement: a new record row arms the hover timer, leaving the
    /// table clears the details at once.
    fn pointer_moved(&mut self, column: u16, row: u16) {
        match self.record_at(column, row) {
            Some(index) if self.hover_target != Some(index) => {
                self.hover_target = Some(index);
                let tx = self.tx.clone();
                self.hover.schedule(
                    move |index| {
                        if tx.try_send(AsyncMessage::HoverSettled(Some(index))).is_err() {
                            debug!(index, "Hover dropped, event loop busy or gone");
                        }
                    },
                    index,
                    self.hover_delay,
                );
            }
            Some(_) => {}
            None => {
                if self.hover_target.is_some() || self.hovered.is_some() {
                    self.clear_hover();
                }
            }
        }
    }

    fn clear_hover(&mut self) {
        self.hover.cancel();
        self.hover_target = None;
        self.hovered = None;
    }

    fn record_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.regions.records?;
        if !area.contains(column, row) {
            return None;
        }
        let index = self.regions.records_offset + usize::from(row - area.y);
        (index < self.records.len()).then_some(index)
    }

    fn open_record(&mut self, index: usize) -> AppAction {
        match self.records.get(index).and_then(|r| r.video_link.clone()) {
            Some(link) => {
                info!(%link, "Opening video link");
                self.last_link = Some(link.clone());
                AppAction::OpenLink(link)
            }
            None => {
                self.show_toast("No video for this play");
                AppAction::None
            }
        }
    }
}
