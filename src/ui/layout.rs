//! Layout management for the TUI.

use crate::config::UiConfig;
use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Pane selector area.
    pub pane_area: Rect,
    /// Pending entry table.
    pub entries_area: Rect,
    /// Parlay tables.
    pub parlays_area: Rect,
    /// Key hint area (bottom).
    pub help_bar_area: Rect,
    /// Notification area (overlaid).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    ///
    /// The entry table grows with `entry_rows` up to half of the content area.
    pub fn new(area: Rect, ui: &UiConfig, entry_rows: usize) -> Self {
        let bar = |shown: bool| Constraint::Length(u16::from(shown));

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                bar(ui.show_status_bar), // Status bar
                Constraint::Length(1),   // Pane bar
                Constraint::Min(0),      // Main content
                bar(ui.show_help_bar),   // Help bar
            ])
            .split(area);

        let main = chunks[2];
        // borders + header + rows, at least room for the empty hint
        let wanted = (entry_rows as u16).saturating_add(3).max(3);
        let entries_height = wanted.min(main.height / 2).max(3.min(main.height));

        let main_chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(entries_height), Constraint::Min(0)])
            .split(main);

        // Notification area is centered in the terminal
        let height = 4.min(area.height);
        let notification_area = Rect {
            x: area.x + area.width / 4,
            y: area.y + (area.height / 2).saturating_sub(height / 2),
            width: area.width / 2,
            height,
        };

        Self {
            status_area: chunks[0],
            pane_area: chunks[1],
            entries_area: main_chunks[0],
            parlays_area: main_chunks[1],
            help_bar_area: chunks[3],
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_can_be_hidden() {
        let area = Rect::new(0, 0, 80, 24);
        let ui = UiConfig {
            show_status_bar: false,
            show_help_bar: false,
            ..UiConfig::default()
        };
        let layout = Layout::new(area, &ui, 2);
        assert_eq!(layout.status_area.height, 0);
        assert_eq!(layout.help_bar_area.height, 0);
        assert_eq!(layout.pane_area.y, 0);
        assert_eq!(layout.entries_area.height, 5);
        assert_eq!(layout.parlays_area.height, 24 - 1 - 5);
    }

    #[test]
    fn test_entry_table_is_capped() {
        let layout = Layout::new(Rect::new(0, 0, 80, 24), &UiConfig::default(), 50);
        assert_eq!(layout.entries_area.height, 10);
    }

    #[test]
    fn test_tiny_terminal_does_not_underflow() {
        let layout = Layout::new(Rect::new(0, 0, 10, 2), &UiConfig::default(), 0);
        assert!(layout.notification_area.height <= 2);
    }
}
