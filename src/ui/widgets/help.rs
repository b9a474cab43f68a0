//! Help panel and help bar widgets.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let nav_keys = format!("{}/↑ {}/↓", keys.up, keys.down);
        let field_keys = format!("{}/← {}/→", keys.left, keys.right);

        let mut help_text = section("Navigation");
        help_text.push(entry(&nav_keys, "Move selection"));
        help_text.push(entry("Home/End", "Go to top/bottom"));
        help_text.push(entry(&keys.focus, "Switch pane"));
        help_text.push(Line::from(""));

        help_text.extend(section("Pending bets"));
        help_text.push(entry(&keys.add_entry, "Add a bet"));
        help_text.push(entry(&field_keys, "Previous/next column"));
        help_text.push(entry(&keys.edit, "Edit column (Enter saves, Esc cancels)"));
        help_text.push(entry(&keys.toggle_home, "Toggle home team"));
        help_text.push(entry(&keys.remove, "Remove bet"));
        help_text.push(entry(&keys.commit, "Commit bets as a parlay"));
        help_text.push(Line::from(""));

        help_text.extend(section("Parlays"));
        help_text.push(entry(&keys.remove, "Stop watching parlay"));
        help_text.push(Line::from(""));

        help_text.extend(section("General"));
        help_text.push(entry(&keys.back, "Dismiss popup"));
        help_text.push(entry(&keys.help, "Toggle help"));
        help_text.push(entry(&keys.quit, "Quit"));

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}

/// One-line key hint shown at the bottom of the screen.
pub fn render_help_bar(frame: &mut Frame, area: Rect, keys: &KeyBindings, editing: bool) {
    let hints: Vec<(&str, &str)> = if editing {
        vec![("Enter", "save"), ("Esc", "cancel"), ("←/→", "move cursor")]
    } else {
        vec![
            (keys.add_entry.as_str(), "add"),
            (keys.edit.as_str(), "edit"),
            (keys.toggle_home.as_str(), "home"),
            (keys.commit.as_str(), "commit"),
            (keys.remove.as_str(), "remove"),
            (keys.focus.as_str(), "pane"),
            (keys.quit.as_str(), "quit"),
        ]
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
        spans.push(Span::styled(
            format!(" {}  ", label),
            Style::default().fg(Color::Gray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn section(title: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ]
}

fn entry(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), Style::default().fg(Color::Cyan)),
        Span::raw(description.to_string()),
    ])
}
