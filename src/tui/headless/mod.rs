//! Headless mode for scripted testing and automation.
//!
//! Runs the dashboard against an in-memory terminal, executing scripted
//! events and capturing output for verification.

mod events;
mod output;

pub use events::{Assertion, Event, EventParser};
pub use output::{HeadlessOutput, OutputFormat, ScreenRenderer};

use crate::cli::Cli;
use crate::config::Config;
use crate::data::{self, BattedBallSource};
use crate::error::{Result, VizError};
use crate::roster::{self, Roster};
use crate::tui::app::{App, AppAction};
use crate::tui::{ui, AsyncMessage};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Configuration for headless mode execution.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Screen width in columns.
    pub width: u16,
    /// Screen height in rows.
    pub height: u16,
    pub output_format: OutputFormat,
    /// Whether to stop on first assertion failure.
    pub fail_fast: bool,
    /// Path to write output (None = stdout).
    pub output_file: Option<std::path::PathBuf>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 30,
            output_format: OutputFormat::Text,
            fail_fast: false,
            output_file: None,
        }
    }
}

impl HeadlessConfig {
    /// Creates a HeadlessConfig from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (width, height) = cli.parse_screen_size().map_err(VizError::config)?;
        let output_format = cli.parse_output_format().map_err(VizError::config)?;

        Ok(Self {
            width,
            height,
            output_format,
            fail_fast: cli.fail_fast,
            output_file: cli.output_file.clone(),
        })
    }
}

/// Result of headless execution.
#[derive(Debug)]
pub struct HeadlessResult {
    /// Final screen content as text.
    pub screen: String,
    /// Screen lines for JSON output.
    pub screen_lines: Vec<String>,
    pub events_executed: usize,
    pub duration: Duration,
    pub assertions_passed: usize,
    pub assertions_failed: usize,
    /// Failed assertions, as written in the script.
    pub failures: Vec<String>,
    /// Application state snapshot.
    pub state: HeadlessState,
    /// Frame captures (for frames output mode).
    pub frames: Vec<Frame>,
}

/// Snapshot of application state, checked by `assert:state:` and written
/// in JSON output.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HeadlessState {
    pub focus: String,
    pub tab: String,
    pub hitter_text: String,
    pub pitcher_text: String,
    /// "open" or "closed".
    pub hitter_dropdown: String,
    pub pitcher_dropdown: String,
    pub hitter_suggestions: usize,
    pub pitcher_suggestions: usize,
    pub record_count: usize,
    /// Index of the record in the details panel, or "none".
    pub hovered: String,
    /// Last link opened, or "none".
    pub last_link: String,
    /// Ballpark the spray chart is drawn for.
    pub ballpark: String,
    /// Live interaction listeners.
    pub listeners: usize,
    pub is_loading: bool,
    pub running: bool,
}

impl HeadlessState {
    pub fn from_app(app: &App) -> Self {
        let hitter = &app.form.hitter;
        let pitcher = &app.form.pitcher;
        Self {
            focus: app.focus.as_str().to_string(),
            tab: app.tab.as_str().to_string(),
            hitter_text: hitter.text().to_string(),
            pitcher_text: pitcher.text().to_string(),
            hitter_dropdown: hitter.state().as_str().to_string(),
            pitcher_dropdown: pitcher.state().as_str().to_string(),
            hitter_suggestions: hitter.suggestions().len(),
            pitcher_suggestions: pitcher.suggestions().len(),
            record_count: app.records.len(),
            hovered: app
                .hovered
                .map_or_else(|| "none".to_string(), |i| i.to_string()),
            last_link: app.last_link.clone().unwrap_or_else(|| "none".to_string()),
            ballpark: app.ballpark().name.to_string(),
            listeners: app.listener_count(),
            is_loading: app.is_loading,
            running: app.running,
        }
    }

    /// Returns a field by name, formatted for comparison.
    pub fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "focus" => self.focus.clone(),
            "tab" => self.tab.clone(),
            "hitter_text" => self.hitter_text.clone(),
            "pitcher_text" => self.pitcher_text.clone(),
            "hitter_dropdown" => self.hitter_dropdown.clone(),
            "pitcher_dropdown" => self.pitcher_dropdown.clone(),
            "hitter_suggestions" => self.hitter_suggestions.to_string(),
            "pitcher_suggestions" => self.pitcher_suggestions.to_string(),
            "record_count" => self.record_count.to_string(),
            "hovered" => self.hovered.clone(),
            "last_link" => self.last_link.clone(),
            "ballpark" => self.ballpark.clone(),
            "listeners" => self.listeners.to_string(),
            "is_loading" => self.is_loading.to_string(),
            "running" => self.running.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// One-line summary printed under each captured frame.
    pub fn summary(&self) -> String {
        format!(
            "focus={} tab={} hitter={}({}) pitcher={}({}) records={} hovered={}",
            self.focus,
            self.tab,
            self.hitter_dropdown,
            self.hitter_suggestions,
            self.pitcher_dropdown,
            self.pitcher_suggestions,
            self.record_count,
            self.hovered
        )
    }
}

/// A captured frame (screen state after an event).
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame number (0 = initial state).
    pub number: usize,
    /// Event that produced this frame (None for initial).
    pub event: Option<String>,
    pub screen: String,
    /// Dashboard state when the frame was captured.
    pub state: HeadlessState,
}

/// Runs the dashboard in headless mode.
///
/// Queries are awaited in place instead of spawned, so every event sees
/// the records its filters produce.
pub struct HeadlessRunner {
    config: HeadlessConfig,
    terminal: Terminal<TestBackend>,
    app: App,
    source: Arc<dyn BattedBallSource>,
    rx: mpsc::Receiver<AsyncMessage>,
    events: Vec<Event>,
    frames: Vec<Frame>,
    start_time: Instant,
    assertions_passed: usize,
    assertions_failed: usize,
    failures: Vec<String>,
}

impl HeadlessRunner {
    /// Creates a runner backed by the configured data source and rosters.
    pub async fn new(headless: HeadlessConfig, config: &Config) -> Result<Self> {
        let source = data::connect(&config.data).await?;
        let roster = Roster::load(roster::name_source(config).await.as_ref()).await;
        let mut runner = Self::with_source(
            headless,
            source,
            roster,
            Duration::from_millis(config.ui.hover_debounce_ms),
        )?;
        runner.app.set_ballpark(config.ui.ballpark_index());
        Ok(runner)
    }

    /// Creates a runner around an existing source and roster.
    pub fn with_source(
        config: HeadlessConfig,
        source: Arc<dyn BattedBallSource>,
        roster: Roster,
        hover_delay: Duration,
    ) -> Result<Self> {
        let backend = TestBackend::new(config.width, config.height);
        let terminal = Terminal::new(backend)
            .map_err(|e| VizError::internal(format!("Failed to create test terminal: {e}")))?;

        let (tx, rx) = mpsc::channel(32);
        let app = App::new(&roster, source.describe(), hover_delay, tx);

        Ok(Self {
            config,
            terminal,
            app,
            source,
            rx,
            events: Vec::new(),
            frames: Vec::new(),
            start_time: Instant::now(),
            assertions_passed: 0,
            assertions_failed: 0,
            failures: Vec::new(),
        })
    }

    /// Loads events from a string (comma-separated or newline-separated).
    pub fn load_events(&mut self, input: &str) -> Result<()> {
        let parser = EventParser::new();
        self.events = parser.parse_all(input)?;
        Ok(())
    }

    /// Loads events from a script file, or stdin for "-".
    pub fn load_script(&mut self, path: &str) -> Result<()> {
        let content = if path == "-" {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| VizError::internal(format!("Failed to read stdin: {e}")))?;
            buffer
        } else {
            std::fs::read_to_string(path)
                .map_err(|e| VizError::config(format!("Failed to read script file: {e}")))?
        };

        self.load_events(&content)
    }

    /// Runs the headless execution and returns the result.
    pub async fn run(mut self) -> Result<HeadlessResult> {
        self.start_time = Instant::now();

        let initial = self.app.begin_fetch();
        self.perform(initial).await;
        self.capture_frame(None)?;

        let events = std::mem::take(&mut self.events);
        let mut events_executed = 0;

        for event in events {
            let event_str = event.to_string();
            debug!(event = %event_str, "Headless event");

            match &event {
                Event::Key(key) => self.dispatch(crate::tui::Event::Key(*key)).await,
                Event::Type(text) => {
                    for c in text.chars() {
                        let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
                        self.dispatch(crate::tui::Event::Key(key)).await;
                    }
                }
                Event::Click(column, row) => {
                    // Hit-testing needs the regions of the current screen
                    self.draw()?;
                    let mouse = mouse_event(MouseEventKind::Down(MouseButton::Left), *column, *row);
                    self.dispatch(crate::tui::Event::Mouse(mouse)).await;
                }
                Event::Hover(column, row) => {
                    self.draw()?;
                    let mouse = mouse_event(MouseEventKind::Moved, *column, *row);
                    self.dispatch(crate::tui::Event::Mouse(mouse)).await;
                }
                Event::Wait(duration) => {
                    tokio::time::sleep(*duration).await;
                    self.app.handle_event(crate::tui::Event::Tick);
                }
                Event::Resize(w, h) => {
                    self.terminal
                        .resize(Rect::new(0, 0, *w, *h))
                        .map_err(|e| VizError::internal(format!("Resize failed: {e}")))?;
                    self.dispatch(crate::tui::Event::Resize(*w, *h)).await;
                }
                Event::Snapshot(_name) => {
                    // Snapshots are captured as frames
                }
                Event::Assert(assertion) => {
                    self.drain_messages();
                    self.draw()?;
                    let screen = self.render_screen();
                    let state = HeadlessState::from_app(&self.app);
                    if assertion.check(&screen, &state) {
                        self.assertions_passed += 1;
                    } else {
                        info!(assertion = %event_str, "Assertion failed");
                        self.assertions_failed += 1;
                        self.failures.push(event_str.clone());
                        if self.config.fail_fast {
                            events_executed += 1;
                            break;
                        }
                    }
                }
            }

            events_executed += 1;
            self.drain_messages();
            self.draw()?;

            if self.config.output_format == OutputFormat::Frames {
                self.capture_frame(Some(event_str))?;
            }

            if !self.app.running {
                break;
            }
        }

        self.drain_messages();
        self.draw()?;

        let screen = self.render_screen();
        let screen_lines = screen.lines().map(String::from).collect();

        Ok(HeadlessResult {
            screen,
            screen_lines,
            events_executed,
            duration: self.start_time.elapsed(),
            assertions_passed: self.assertions_passed,
            assertions_failed: self.assertions_failed,
            failures: self.failures,
            state: HeadlessState::from_app(&self.app),
            frames: self.frames,
        })
    }

    async fn dispatch(&mut self, event: crate::tui::Event) {
        let action = self.app.handle_event(event);
        self.perform(action).await;
    }

    /// Carries out an app action without leaving the test terminal.
    async fn perform(&mut self, action: AppAction) {
        match action {
            AppAction::None => {}
            AppAction::Fetch(params) => {
                let result = self.source.fetch(&params).await;
                self.app.handle_async(AsyncMessage::DataLoaded(result));
            }
            // The app already recorded the link; nothing is launched.
            AppAction::OpenLink(link) => debug!(%link, "Link open requested"),
        }
    }

    /// Applies messages that background tasks have already sent.
    fn drain_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.app.handle_async(msg);
        }
    }

    fn draw(&mut self) -> Result<()> {
        self.terminal
            .draw(|frame| ui::render(frame, &mut self.app))
            .map_err(|e| VizError::internal(format!("Failed to render: {e}")))?;
        Ok(())
    }

    fn render_screen(&self) -> String {
        ScreenRenderer::render(self.terminal.backend().buffer())
    }

    fn capture_frame(&mut self, event: Option<String>) -> Result<()> {
        self.draw()?;
        let screen = self.render_screen();
        let number = self.frames.len();
        self.frames.push(Frame {
            number,
            event,
            screen,
            state: HeadlessState::from_app(&self.app),
        });
        Ok(())
    }
}

fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Runs headless mode from CLI arguments.
///
/// Returns true when every assertion passed.
pub async fn run_headless(cli: &Cli, config: &Config) -> Result<bool> {
    cli.validate_headless().map_err(VizError::config)?;

    let headless = HeadlessConfig::from_cli(cli)?;
    let mut runner = HeadlessRunner::new(headless.clone(), config).await?;

    if let Some(ref events_str) = cli.events {
        runner.load_events(events_str)?;
    } else if let Some(ref script_path) = cli.script {
        runner.load_script(script_path)?;
    }

    let result = runner.run().await?;

    let output = HeadlessOutput::new(headless.output_format);
    let output_str = output.format(&result);

    if let Some(ref path) = headless.output_file {
        std::fs::write(path, &output_str)
            .map_err(|e| VizError::internal(format!("Failed to write output file: {e}")))?;
    } else {
        print!("{output_str}");
    }

    Ok(result.assertions_failed == 0)
}
