//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering.

use crate::api::{ScoreFeed, ScoreFeedClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::EventHandler;
use crate::state::{Action, Notification, Store};
use crate::ui::Ui;

use chrono::Utc;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application core.
    core: AppCore,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        // Build everything that can fail on bad config before touching the terminal
        let feed: Arc<dyn ScoreFeed> = Arc::new(
            ScoreFeedClient::builder()
                .config(config.feed.clone())
                .build()?,
        );
        let event_handler = EventHandler::new(&config.keybindings, &config.ui)?;

        // Set up terminal
        let terminal = setup_terminal(config.ui.mouse_support)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        info!(base_url = %config.feed.base_url, "parlaywatch started");

        Ok(Self {
            terminal,
            core: AppCore::new(Store::new(action_tx), feed),
            event_handler,
            action_rx,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.core.store.expire_notification(Utc::now());

            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.core.store);

            // Render UI
            let store = &self.core.store;
            let config = &self.config;
            self.terminal.draw(|frame| {
                Ui::render(frame, store, config);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.core.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.core.handle_action(action);
                }
            }

            // Check if we should quit
            if self.core.store.app.should_quit {
                break;
            }
        }

        info!(
            parlays = self.core.store.portfolio.parlays().len(),
            "parlaywatch exiting"
        );
        Ok(())
    }
}

fn setup_terminal(mouse_support: bool) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().map_err(|e| Error::terminal(format!("enabling raw mode: {e}")))?;
    let mut stdout = io::stdout();
    let entered = if mouse_support {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
    } else {
        execute!(stdout, EnterAlternateScreen)
    };
    entered.map_err(|e| Error::terminal(format!("entering alternate screen: {e}")))?;
    Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| Error::terminal(format!("creating terminal: {e}")))
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Store plus the score feed, without the terminal.
struct AppCore {
    store: Store,
    feed: Arc<dyn ScoreFeed>,
}

impl AppCore {
    fn new(store: Store, feed: Arc<dyn ScoreFeed>) -> Self {
        Self { store, feed }
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::CommitParlay => self.commit_parlay(),
            _ => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }
    }

    fn commit_parlay(&mut self) {
        match self.store.portfolio.commit_parlay(Arc::clone(&self.feed)) {
            Ok(id) => self.store.reduce(Action::ParlayCommitted(id)),
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "parlay rejected");
                self.store
                    .reduce(Action::ShowNotification(Notification::warning(e.to_string())));
            }
            Err(e) => {
                error!(error = %e, "commit failed");
                self.store.reduce(Action::SetError(e.to_string()));
            }
        }
    }
}
