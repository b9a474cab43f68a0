//! Pending bet entry table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::config::Config;
use crate::state::{EntryField, Focus, PendingEntry, Store};

const FIELDS: [EntryField; 3] = [EntryField::EventId, EntryField::Home, EntryField::Line];

/// Table of bets not yet committed to a parlay.
pub struct EntryList;

impl EntryList {
    /// Render the entry table.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, config: &Config) {
        let theme = &config.theme;
        let entries = store.portfolio.entries();
        let focused = store.app.focus == Focus::Entries;

        let block = Block::default()
            .title(format!(" Pending bets ({}) ", entries.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                theme.accent()
            } else {
                theme.border()
            }));

        if entries.is_empty() {
            let hint = Paragraph::new(Line::from(vec![
                Span::raw("No pending bets. Press "),
                Span::styled(
                    config.keybindings.add_entry.clone(),
                    Style::default().fg(theme.accent()),
                ),
                Span::raw(" to add one."),
            ]))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let header_cells = ["#", "Event ID", "Home?", "Line"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1);

        let rows = entries.iter().map(|entry| {
            let selected = focused && entries.selected == Some(entry.id);
            let mut cells = vec![Cell::from(format!("{}", entry.id + 1))];
            cells.extend(FIELDS.iter().map(|&field| {
                let active = selected && entries.field == field;
                let text = if active && store.app.is_editing() {
                    with_cursor(&store.app.input_buffer, store.app.cursor_position)
                } else {
                    display_text(entry, field)
                };
                let style = if active {
                    Style::default()
                        .bg(theme.selection())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Cell::from(text).style(style)
            }));
            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(12),
                Constraint::Length(7),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(block)
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        if focused {
            state.select(entries.selected_position());
        }

        frame.render_stateful_widget(table, area, &mut state);
    }
}

fn display_text(entry: &PendingEntry, field: EntryField) -> String {
    match field {
        EntryField::Home => (if entry.home { "[x]" } else { "[ ]" }).to_string(),
        EntryField::EventId if entry.event_id.is_empty() => "<event id>".to_string(),
        _ => entry.field_text(field),
    }
}

/// Insert a cursor marker at a character position.
fn with_cursor(text: &str, cursor: usize) -> String {
    let mut out: String = text.chars().take(cursor).collect();
    out.push('▏');
    out.extend(text.chars().skip(cursor));
    out
}
