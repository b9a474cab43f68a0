//! Application-level state.

use super::Notification;

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Entries,
    Parlays,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Entries => Focus::Parlays,
            Focus::Parlays => Focus::Entries,
        }
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into a field of the selected entry.
    Insert,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Focused pane.
    pub focus: Focus,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Current error message.
    pub error: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Text being edited.
    pub input_buffer: String,
    /// Cursor position in input buffer, in characters.
    pub cursor_position: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Insert
    }

    /// Start editing with `text` in the buffer and the cursor at its end.
    pub fn begin_input(&mut self, text: String) {
        self.cursor_position = text.chars().count();
        self.input_buffer = text;
        self.input_mode = InputMode::Insert;
    }

    /// Leave insert mode, returning the buffer.
    pub fn take_input(&mut self) -> String {
        self.input_mode = InputMode::Normal;
        self.cursor_position = 0;
        std::mem::take(&mut self.input_buffer)
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Add a character at the cursor.
    pub fn push_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_position);
        self.input_buffer.insert(at, c);
        self.cursor_position += 1;
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index(self.cursor_position);
            self.input_buffer.remove(at);
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input_buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.input_buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_editing() {
        let mut app = AppState::new();
        app.begin_input("-3".to_string());
        assert!(app.is_editing());
        app.push_char('.');
        app.push_char('5');
        assert_eq!(app.input_buffer, "-3.5");

        app.cursor_left();
        app.cursor_left();
        app.pop_char();
        assert_eq!(app.input_buffer, "-.5");

        assert_eq!(app.take_input(), "-.5");
        assert!(!app.is_editing());
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_multibyte_input() {
        let mut app = AppState::new();
        app.begin_input("é".to_string());
        app.push_char('1');
        app.cursor_right();
        app.pop_char();
        assert_eq!(app.input_buffer, "é");
    }

    #[test]
    fn test_focus_toggle() {
        assert_eq!(Focus::Entries.toggle(), Focus::Parlays);
        assert_eq!(Focus::Parlays.toggle(), Focus::Entries);
    }
}
