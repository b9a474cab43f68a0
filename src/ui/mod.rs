//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{EntryList, HelpPanel, PaneBar, ParlayList, StatusBar};

use crate::config::Config;
use crate::state::Store;
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store, config: &Config) {
        let layout = Layout::new(frame.area(), &config.ui, store.portfolio.entries().len());

        if config.ui.show_status_bar {
            StatusBar::render(frame, layout.status_area, store, config);
        }
        PaneBar::render(frame, layout.pane_area, store, config);

        EntryList::render(frame, layout.entries_area, store, config);
        ParlayList::render(frame, layout.parlays_area, store, config);

        if config.ui.show_help_bar {
            widgets::render_help_bar(
                frame,
                layout.help_bar_area,
                &config.keybindings,
                store.app.is_editing(),
            );
        }

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), &config.keybindings);
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }

        // Errors win over notifications
        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.notification_area, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockScoreFeed, ScoreFeed};
    use crate::betting::{Competitor, CompetitorSide, GameStatus, Score, ScoreSnapshot};
    use crate::error::FeedError;
    use crate::state::Action;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn screen(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(store: &Store) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let config = Config::default();
        terminal
            .draw(|frame| Ui::render(frame, store, &config))
            .unwrap();
        screen(terminal.backend().buffer())
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    /// Event "1" finished 24-20, event "2" fails.
    fn feed() -> Arc<dyn ScoreFeed> {
        let mut mock = MockScoreFeed::new();
        mock.expect_fetch_snapshot().returning(|event_id| {
            if event_id == "2" {
                return Err(FeedError::transport("connection refused"));
            }
            Ok(ScoreSnapshot {
                event_id: 1,
                score: Score::new(24, 20),
                game_status: GameStatus::GameEnd,
                description: "Jets @ Bills".to_string(),
                competitors: vec![
                    Competitor {
                        name: "Bills".to_string(),
                        side: CompetitorSide::Home,
                    },
                    Competitor {
                        name: "Jets".to_string(),
                        side: CompetitorSide::Visitor,
                    },
                ],
            })
        });
        Arc::new(mock)
    }

    #[test]
    fn test_empty_dashboard() {
        let text = draw(&store());
        assert!(text.contains("parlaywatch"));
        assert!(text.contains("No pending bets"));
        assert!(text.contains("No parlays yet"));
    }

    #[test]
    fn test_pending_entries_render() {
        let mut store = store();
        store.reduce(Action::AddEntry);
        let id = store.portfolio.entries.selected.unwrap();
        store.portfolio.set_event_id(id, "4242").unwrap();
        store.portfolio.set_line(id, "-3.5").unwrap();

        let text = draw(&store);
        assert!(text.contains("Pending bets (1)"));
        assert!(text.contains("4242"));
        assert!(text.contains("-3.5"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_parlay_rows_render_after_fetch() {
        let mut store = store();
        for (event, home) in [("1", true), ("2", false)] {
            store.reduce(Action::AddEntry);
            let id = store.portfolio.entries.selected.unwrap();
            store.portfolio.set_event_id(id, event).unwrap();
            store.portfolio.set_home(id, home).unwrap();
            store.portfolio.set_line(id, "-3").unwrap();
        }
        store.portfolio.commit_parlay(feed()).unwrap();

        let before = draw(&store);
        assert!(before.contains("Loading..."));

        for _ in 0..16 {
            tokio::task::yield_now().await;
        }

        let after = draw(&store);
        assert!(after.contains("Jets @ Bills"));
        assert!(after.contains("Bills"));
        assert!(after.contains("24-20"));
        assert!(after.contains("Won"));
        assert!(after.contains("Something went wrong!"));
        assert!(!after.contains("Loading..."));
    }

    #[test]
    fn test_error_popup_renders() {
        let mut store = store();
        store.reduce(Action::SetError("Bet #1: line 'x' is not a number".to_string()));
        let text = draw(&store);
        assert!(text.contains("Error:"));
    }
}
