//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::Config;
use crate::state::Store;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, config: &Config) {
        let portfolio = &store.portfolio;
        let live = portfolio.live_monitor_count();

        let live_status = if live > 0 {
            Span::styled(format!("● {} live", live), Style::default().fg(Color::Green))
        } else {
            Span::styled("○ idle", Style::default().fg(Color::Gray))
        };

        let mode = if store.app.is_editing() {
            Span::styled(
                " INSERT ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(
            format!(" Press {} for help ", config.keybindings.help),
            Style::default().fg(Color::Gray),
        );

        let status_line = Line::from(vec![
            Span::styled(
                " parlaywatch ",
                Style::default()
                    .fg(config.theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::raw(format!("{} parlays", portfolio.parlays().len())),
            Span::raw(" | "),
            live_status,
            Span::raw(" | "),
            Span::raw(format!("{} pending", portfolio.entries().len())),
            mode,
        ]);

        // Right-align the help hint
        let padding = area
            .width
            .saturating_sub((status_line.width() + help_hint.width()) as u16);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding as usize)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
