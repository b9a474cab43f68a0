//! Pane selector widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::Config;
use crate::state::{Focus, Store};

/// Shows which pane has focus.
pub struct PaneBar;

impl PaneBar {
    /// Render the pane bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, config: &Config) {
        let panes = [("Pending bets", Focus::Entries), ("Parlays", Focus::Parlays)];

        let mut spans = vec![
            Span::styled(
                format!(" [{}] ", config.keybindings.focus),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        for (name, focus) in panes {
            let style = if store.app.focus == focus {
                Style::default()
                    .fg(config.theme.accent())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(name, style));
            spans.push(Span::raw("  "));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
