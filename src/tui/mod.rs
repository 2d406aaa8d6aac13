//! Terminal User Interface for bbviz.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
pub mod events;
pub mod form;
pub mod headless;
pub mod links;
pub mod ui;
pub mod widgets;

pub use app::{App, AppAction};
pub use events::{Event, EventHandler};

use crate::config::Config;
use crate::data::{BattedBall, BattedBallSource, FilterParams};
use crate::error::{Result, VizError};
use crate::roster::Roster;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Messages sent from background tasks to the main loop.
#[derive(Debug)]
pub enum AsyncMessage {
    /// A data query finished.
    DataLoaded(Result<Vec<BattedBall>>),
    /// The pointer rested on a record long enough.
    HoverSettled(Option<usize>),
}

/// Runs a query in the background and reports back on `tx`.
pub fn spawn_fetch(
    source: &Arc<dyn BattedBallSource>,
    params: FilterParams,
    tx: &mpsc::Sender<AsyncMessage>,
) {
    let source = Arc::clone(source);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = source.fetch(&params).await;
        if tx.send(AsyncMessage::DataLoaded(result)).await.is_err() {
            debug!("Query finished after the UI closed");
        }
    });
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| VizError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| VizError::internal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
            .map_err(|e| VizError::internal(format!("Failed to create terminal: {e}")))
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| VizError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| VizError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| VizError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the dashboard until the user quits.
    pub async fn run(
        &mut self,
        source: Arc<dyn BattedBallSource>,
        roster: Roster,
        config: &Config,
    ) -> Result<()> {
        // Restore the terminal before the panic message is printed
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let (tx, mut rx) = mpsc::channel::<AsyncMessage>(32);
        let mut app = App::new(
            &roster,
            source.describe(),
            Duration::from_millis(config.ui.hover_debounce_ms),
            tx.clone(),
        );
        app.set_ballpark(config.ui.ballpark_index());
        info!(source = %app.source_label, "Dashboard started");

        let initial = app.begin_fetch();
        self.dispatch(initial, &mut app, &source, &tx);

        let result = self.run_event_loop(&mut app, &source, &tx, &mut rx).await;

        let _ = panic::take_hook();
        result
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(
        &mut self,
        app: &mut App,
        source: &Arc<dyn BattedBallSource>,
        tx: &mpsc::Sender<AsyncMessage>,
        rx: &mut mpsc::Receiver<AsyncMessage>,
    ) -> Result<()> {
        loop {
            self.terminal
                .draw(|frame| ui::render(frame, app))
                .map_err(|e| VizError::internal(format!("Failed to draw: {e}")))?;

            if !app.running {
                break;
            }

            let tick_rate = self.event_handler.tick_rate();
            tokio::select! {
                // Terminal events
                event_result = tokio::task::spawn_blocking(move || {
                    if crossterm::event::poll(tick_rate).unwrap_or(false) {
                        crossterm::event::read().ok()
                    } else {
                        None
                    }
                }) => {
                    let event = match event_result {
                        Ok(Some(event)) => Event::from(event),
                        Ok(None) => Event::Tick,
                        Err(e) => {
                            warn!("Event reader task failed: {e}");
                            Event::Tick
                        }
                    };
                    let action = app.handle_event(event);
                    self.dispatch(action, app, source, tx);
                }

                // Messages from background tasks
                Some(msg) = rx.recv() => {
                    app.handle_async(msg);
                }
            }
        }

        Ok(())
    }

    /// Carries out the side effect an input asked for.
    fn dispatch(
        &mut self,
        action: AppAction,
        app: &mut App,
        source: &Arc<dyn BattedBallSource>,
        tx: &mpsc::Sender<AsyncMessage>,
    ) {
        match action {
            AppAction::None => {}
            AppAction::Fetch(params) => spawn_fetch(source, params, tx),
            AppAction::OpenLink(link) => match links::open(&link) {
                Ok(outcome) => app.show_toast(outcome.message()),
                Err(e) => {
                    warn!("{e}");
                    app.show_toast(e.to_string());
                }
            },
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
