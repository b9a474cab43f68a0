//! Event handler for processing input events.

use super::KeyBinding;
use crate::config::{KeyBindings, UiConfig};
use crate::error::Result;
use crate::state::{Action, Focus, InputMode, Store};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Parsed key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub left: KeyBinding,
    pub right: KeyBinding,
    pub edit: KeyBinding,
    pub back: KeyBinding,
    pub focus: KeyBinding,
    pub add_entry: KeyBinding,
    pub remove: KeyBinding,
    pub toggle_home: KeyBinding,
    pub commit: KeyBinding,
}

impl Keymap {
    /// Parse every configured binding, failing on the first invalid one.
    pub fn from_bindings(bindings: &KeyBindings) -> Result<Self> {
        Ok(Self {
            quit: KeyBinding::parse(&bindings.quit)?,
            help: KeyBinding::parse(&bindings.help)?,
            up: KeyBinding::parse(&bindings.up)?,
            down: KeyBinding::parse(&bindings.down)?,
            left: KeyBinding::parse(&bindings.left)?,
            right: KeyBinding::parse(&bindings.right)?,
            edit: KeyBinding::parse(&bindings.edit)?,
            back: KeyBinding::parse(&bindings.back)?,
            focus: KeyBinding::parse(&bindings.focus)?,
            add_entry: KeyBinding::parse(&bindings.add_entry)?,
            remove: KeyBinding::parse(&bindings.remove)?,
            toggle_home: KeyBinding::parse(&bindings.toggle_home)?,
            commit: KeyBinding::parse(&bindings.commit)?,
        })
    }
}

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keymap: Keymap,
    /// How long to wait for terminal input before yielding.
    tick_rate: Duration,
    mouse_support: bool,
    /// Store reference for state-aware handling.
    snapshot: StoreSnapshot,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Default)]
struct StoreSnapshot {
    input_mode: InputMode,
    focus: Focus,
    show_help: bool,
    has_error: bool,
    has_notification: bool,
}

impl EventHandler {
    /// Create a new event handler from the configured bindings.
    pub fn new(bindings: &KeyBindings, ui: &UiConfig) -> Result<Self> {
        Ok(Self {
            keymap: Keymap::from_bindings(bindings)?,
            tick_rate: Duration::from_millis(ui.tick_rate_ms.max(1)),
            mouse_support: ui.mouse_support,
            snapshot: StoreSnapshot::default(),
        })
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.snapshot = StoreSnapshot {
            input_mode: store.app.input_mode,
            focus: store.app.focus,
            show_help: store.app.show_help,
            has_error: store.app.error.is_some(),
            has_notification: store.app.notification.is_some(),
        };
    }

    /// Get the next action from user input.
    ///
    /// Returns `None` when no input arrived within one tick.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(self.tick_rate)? {
            let action = match event::read()? {
                CrosstermEvent::Key(key) => self.handle_key(key),
                CrosstermEvent::Mouse(mouse) => self.handle_mouse(mouse),
                _ => None,
            };
            return Ok(action);
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match self.snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Insert => self.handle_insert_mode(key),
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        if !self.mouse_support {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent) -> Option<Action> {
        let keys = &self.keymap;
        let snapshot = &self.snapshot;

        // Popups swallow their dismiss keys
        if snapshot.has_error && (keys.back.matches(&key) || keys.edit.matches(&key)) {
            return Some(Action::ClearError);
        }
        if snapshot.show_help && (keys.back.matches(&key) || keys.help.matches(&key)) {
            return Some(Action::ToggleHelp);
        }

        // Global shortcuts
        if keys.quit.matches(&key) {
            return Some(Action::Quit);
        }
        if keys.help.matches(&key) {
            return Some(Action::ToggleHelp);
        }
        if keys.focus.matches(&key) {
            return Some(Action::FocusNext);
        }
        if keys.add_entry.matches(&key) {
            return Some(Action::AddEntry);
        }
        if keys.commit.matches(&key) {
            return Some(Action::CommitParlay);
        }
        if keys.back.matches(&key) && snapshot.has_notification {
            return Some(Action::DismissNotification);
        }

        // Navigation
        if keys.up.matches(&key) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if keys.down.matches(&key) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        match key.code {
            KeyCode::Home => return Some(Action::GoToTop),
            KeyCode::End => return Some(Action::GoToBottom),
            _ => {}
        }

        match snapshot.focus {
            Focus::Entries => self.handle_entries_pane(key),
            Focus::Parlays => self.handle_parlays_pane(key),
        }
    }

    fn handle_entries_pane(&self, key: KeyEvent) -> Option<Action> {
        let keys = &self.keymap;

        if keys.left.matches(&key) || key.code == KeyCode::Left {
            return Some(Action::PrevField);
        }
        if keys.right.matches(&key) || key.code == KeyCode::Right {
            return Some(Action::CycleField);
        }
        if keys.edit.matches(&key) {
            return Some(Action::BeginEdit);
        }
        if keys.toggle_home.matches(&key) {
            return Some(Action::ToggleHome);
        }
        if keys.remove.matches(&key) {
            return Some(Action::RemoveEntry);
        }
        None
    }

    fn handle_parlays_pane(&self, key: KeyEvent) -> Option<Action> {
        if self.keymap.remove.matches(&key) {
            return Some(Action::RemoveParlay);
        }
        None
    }

    fn handle_insert_mode(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Enter => Some(Action::SubmitEdit),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Left => Some(Action::CursorLeft),
            KeyCode::Right => Some(Action::CursorRight),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Action::InputChar(c))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Notification;
    use tokio::sync::mpsc;

    fn handler() -> EventHandler {
        EventHandler::new(&KeyBindings::default(), &UiConfig::default()).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    #[test]
    fn test_entry_pane_keys() {
        let handler = handler();
        assert!(matches!(
            handler.handle_key(key(KeyCode::Char('a'))),
            Some(Action::AddEntry)
        ));
        assert!(matches!(
            handler.handle_key(key(KeyCode::Char(' '))),
            Some(Action::ToggleHome)
        ));
        assert!(matches!(
            handler.handle_key(key(KeyCode::Right)),
            Some(Action::CycleField)
        ));
        assert!(matches!(
            handler.handle_key(key(KeyCode::Enter)),
            Some(Action::BeginEdit)
        ));
        assert!(matches!(
            handler.handle_key(key(KeyCode::Char('d'))),
            Some(Action::RemoveEntry)
        ));
    }

    #[test]
    fn test_remove_follows_focus() {
        let mut handler = handler();
        let mut store = store();
        store.reduce(Action::FocusNext);
        handler.update_store_snapshot(&store);

        assert!(matches!(
            handler.handle_key(key(KeyCode::Char('d'))),
            Some(Action::RemoveParlay)
        ));
        assert!(handler.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_insert_mode_captures_text() {
        let mut handler = handler();
        let mut store = store();
        store.reduce(Action::AddEntry);
        store.reduce(Action::BeginEdit);
        handler.update_store_snapshot(&store);

        assert!(matches!(
            handler.handle_key(key(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        ));
        assert!(matches!(
            handler.handle_key(key(KeyCode::Enter)),
            Some(Action::SubmitEdit)
        ));
        assert!(matches!(
            handler.handle_key(key(KeyCode::Esc)),
            Some(Action::CancelEdit)
        ));
        assert!(
            handler
                .handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .is_none()
        );
    }

    #[test]
    fn test_popups_take_dismiss_keys() {
        let mut handler = handler();
        let mut store = store();
        store.reduce(Action::SetError("boom".to_string()));
        handler.update_store_snapshot(&store);
        assert!(matches!(
            handler.handle_key(key(KeyCode::Esc)),
            Some(Action::ClearError)
        ));

        store.reduce(Action::ClearError);
        store.reduce(Action::ShowNotification(Notification::info("hi")));
        handler.update_store_snapshot(&store);
        assert!(matches!(
            handler.handle_key(key(KeyCode::Esc)),
            Some(Action::DismissNotification)
        ));
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = KeyBindings {
            commit: "Ctrl+s".to_string(),
            ..KeyBindings::default()
        };
        let handler = EventHandler::new(&bindings, &UiConfig::default()).unwrap();
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(Action::CommitParlay)
        ));
        assert!(handler.handle_key(key(KeyCode::Char('c'))).is_none());
    }

    #[test]
    fn test_invalid_binding_is_rejected() {
        let bindings = KeyBindings {
            quit: "Super+q".to_string(),
            ..KeyBindings::default()
        };
        assert!(EventHandler::new(&bindings, &UiConfig::default()).is_err());
    }
}
