//! State management for parlaywatch.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture.

mod app_state;
mod entry_state;
mod portfolio_state;

pub use app_state::{AppState, Focus, InputMode};
pub use entry_state::{EntryBook, EntryField, EntryId, PendingEntry};
pub use portfolio_state::{PortfolioState, TrackedParlay};

use crate::betting::ParlayId;
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    FocusNext,

    // Entry editing
    AddEntry,
    RemoveEntry,
    SelectEntry(EntryId),
    CycleField,
    PrevField,
    ToggleHome,
    BeginEdit,
    InputChar(char),
    InputBackspace,
    CursorLeft,
    CursorRight,
    SubmitEdit,
    CancelEdit,

    // Parlay actions
    CommitParlay,
    ParlayCommitted(ParlayId),
    RemoveParlay,

    // UI actions
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,

    // Error handling
    SetError(String),
    ClearError,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub created_at: DateTime<Utc>,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    fn with_level(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Error, 10)
    }

    /// Whether the notification has been shown long enough.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(self.duration_secs as i64)
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Pending entries and committed parlays.
    pub portfolio: PortfolioState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::new(),
            portfolio: PortfolioState::new(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    ///
    /// `CommitParlay` needs the score feed and is handled by the app.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::FocusNext => self.app.focus = self.app.focus.toggle(),

            // Entry editing
            Action::AddEntry => {
                self.portfolio.add_entry();
                self.app.focus = Focus::Entries;
            }
            Action::RemoveEntry => {
                if let Some(id) = self.portfolio.entries.selected {
                    let result = self.portfolio.remove_entry(id);
                    self.apply(result);
                }
            }
            Action::SelectEntry(id) => {
                if self.portfolio.entries.get(id).is_some() {
                    self.portfolio.entries.selected = Some(id);
                    self.app.focus = Focus::Entries;
                }
            }
            Action::CycleField => {
                let entries = &mut self.portfolio.entries;
                entries.field = entries.field.next();
            }
            Action::PrevField => {
                let entries = &mut self.portfolio.entries;
                entries.field = entries.field.prev();
            }
            Action::ToggleHome => {
                if let Some(id) = self.portfolio.entries.selected {
                    let result = self.portfolio.toggle_home(id);
                    self.apply(result);
                }
            }
            Action::BeginEdit => self.begin_edit(),
            Action::InputChar(c) => {
                if self.app.is_editing() {
                    self.app.push_char(c);
                }
            }
            Action::InputBackspace => self.app.pop_char(),
            Action::CursorLeft => self.app.cursor_left(),
            Action::CursorRight => self.app.cursor_right(),
            Action::SubmitEdit => self.submit_edit(),
            Action::CancelEdit => {
                self.app.clear_input();
                self.app.input_mode = InputMode::Normal;
            }

            // Parlay actions
            Action::CommitParlay => {}
            Action::ParlayCommitted(id) => {
                self.app.focus = Focus::Parlays;
                self.app.notification = Some(Notification::success(format!(
                    "Parlay {} is live",
                    short_id(id)
                )));
            }
            Action::RemoveParlay => {
                if let Some(id) = self.portfolio.selected_parlay().map(|p| p.parlay.id) {
                    let result = self.portfolio.remove_parlay(id);
                    self.apply(result);
                    self.app.notification =
                        Some(Notification::info(format!("Parlay {} removed", short_id(id))));
                }
            }

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::GoToTop => self.scroll(i32::MIN / 2),
            Action::GoToBottom => self.scroll(i32::MAX / 2),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }

            // Error handling
            Action::SetError(error) => {
                self.app.error = Some(error);
            }
            Action::ClearError => {
                self.app.error = None;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    /// Drop the notification once it has timed out.
    pub fn expire_notification(&mut self, now: DateTime<Utc>) {
        if self
            .app
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.app.notification = None;
        }
    }

    fn begin_edit(&mut self) {
        let entries = &self.portfolio.entries;
        let Some(entry) = entries.selected.and_then(|id| entries.get(id)) else {
            return;
        };

        let field = entries.field;
        if field.is_text() {
            let text = entry.field_text(field);
            self.app.begin_input(text);
        } else {
            let id = entry.id;
            let result = self.portfolio.toggle_home(id);
            self.apply(result);
        }
    }

    fn submit_edit(&mut self) {
        if !self.app.is_editing() {
            return;
        }
        let text = self.app.take_input();
        let field = self.portfolio.entries.field;
        if let Some(id) = self.portfolio.entries.selected {
            let result = self.portfolio.entries.set_field(id, field, text);
            self.apply(result);
        }
    }

    fn scroll(&mut self, delta: i32) {
        match self.app.focus {
            Focus::Entries => self.portfolio.entries.move_selection(delta),
            Focus::Parlays => self.portfolio.move_parlay_selection(delta),
        }
    }

    fn apply(&mut self, result: Result<()>) {
        if let Err(e) = result {
            self.app.error = Some(e.to_string());
        }
    }
}

/// First block of a parlay id, for display.
pub fn short_id(id: ParlayId) -> String {
    id.simple().to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    #[test]
    fn test_edit_line_through_actions() {
        let mut store = store();
        store.reduce(Action::AddEntry);
        store.reduce(Action::CycleField);
        store.reduce(Action::CycleField);
        assert_eq!(store.portfolio.entries.field, EntryField::Line);

        store.reduce(Action::BeginEdit);
        assert!(store.app.is_editing());
        assert_eq!(store.app.input_buffer, "0");

        store.reduce(Action::InputBackspace);
        for c in "-2.5".chars() {
            store.reduce(Action::InputChar(c));
        }
        store.reduce(Action::SubmitEdit);

        let id = store.portfolio.entries.selected.unwrap();
        assert_eq!(store.portfolio.entries.get(id).unwrap().line, "-2.5");
        assert!(!store.app.is_editing());
    }

    #[test]
    fn test_cancel_edit_keeps_value() {
        let mut store = store();
        store.reduce(Action::AddEntry);
        store.reduce(Action::BeginEdit);
        store.reduce(Action::InputChar('9'));
        store.reduce(Action::CancelEdit);

        let id = store.portfolio.entries.selected.unwrap();
        assert_eq!(store.portfolio.entries.get(id).unwrap().event_id, "");
        assert_eq!(store.app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_begin_edit_on_home_toggles() {
        let mut store = store();
        store.reduce(Action::AddEntry);
        store.reduce(Action::CycleField);
        store.reduce(Action::BeginEdit);

        let id = store.portfolio.entries.selected.unwrap();
        assert!(store.portfolio.entries.get(id).unwrap().home);
        assert!(!store.app.is_editing());
    }

    #[test]
    fn test_toggle_home_and_removals_through_actions() {
        let mut store = store();
        store.reduce(Action::AddEntry);
        store.reduce(Action::ToggleHome);
        let id = store.portfolio.entries.selected.unwrap();
        assert!(store.portfolio.entries.get(id).unwrap().home);

        store.reduce(Action::RemoveParlay);
        assert!(store.app.error.is_none());

        store.reduce(Action::RemoveEntry);
        store.reduce(Action::ToggleHome);
        assert!(store.portfolio.entries.is_empty());
    }

    #[test]
    fn test_remove_selected_entry() {
        let mut store = store();
        store.reduce(Action::AddEntry);
        store.reduce(Action::AddEntry);
        store.reduce(Action::RemoveEntry);
        assert_eq!(store.portfolio.entries.len(), 1);
    }

    #[test]
    fn test_select_entry_ignores_unknown_id() {
        let mut store = store();
        store.reduce(Action::AddEntry);
        let first = store.portfolio.entries.selected.unwrap();
        store.reduce(Action::AddEntry);

        store.reduce(Action::SelectEntry(first));
        assert_eq!(store.portfolio.entries.selected, Some(first));
        store.reduce(Action::SelectEntry(99));
        assert_eq!(store.portfolio.entries.selected, Some(first));
    }

    #[test]
    fn test_scroll_follows_focus() {
        let mut store = store();
        store.reduce(Action::AddEntry);
        store.reduce(Action::AddEntry);
        store.reduce(Action::GoToTop);
        assert_eq!(store.portfolio.entries.selected_position(), Some(0));
        store.reduce(Action::ScrollDown);
        assert_eq!(store.portfolio.entries.selected_position(), Some(1));

        store.reduce(Action::FocusNext);
        store.reduce(Action::ScrollUp);
        assert_eq!(store.portfolio.entries.selected_position(), Some(1));
    }

    #[test]
    fn test_notification_expiry() {
        let mut store = store();
        let notification = Notification::info("hello");
        let shown_at = notification.created_at;
        store.reduce(Action::ShowNotification(notification));

        store.expire_notification(shown_at + Duration::seconds(1));
        assert!(store.app.notification.is_some());
        store.expire_notification(shown_at + Duration::seconds(3));
        assert!(store.app.notification.is_none());
    }

    #[test]
    fn test_dispatch_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let store = Store::new(tx);
        store.dispatch(Action::Quit).unwrap();
        assert!(matches!(rx.try_recv(), Ok(Action::Quit)));
    }

    #[test]
    fn test_short_id() {
        let id = uuid::Uuid::nil();
        assert_eq!(short_id(id), "00000000");
    }
}
