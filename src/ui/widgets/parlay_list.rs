//! Committed parlay tables.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use rust_decimal::Decimal;

use crate::betting::{Bet, BetRuntimeState, BetStatus, RowClass, classify};
use crate::config::{Config, ThemeConfig};
use crate::state::{Focus, Store, TrackedParlay, short_id};

/// Stacked tables, one per committed parlay.
pub struct ParlayList;

impl ParlayList {
    /// Render every parlay that fits, keeping the selected one visible.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, config: &Config) {
        let parlays = store.portfolio.parlays();
        if parlays.is_empty() {
            let hint = Paragraph::new(Line::from(vec![
                Span::raw("No parlays yet. Add bets and press "),
                Span::styled(
                    config.keybindings.commit.clone(),
                    Style::default().fg(config.theme.accent()),
                ),
                Span::raw(" to commit them."),
            ]))
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(" Parlays ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(config.theme.border())),
            );
            frame.render_widget(hint, area);
            return;
        }

        let selected = store.portfolio.selected_parlay.unwrap_or(0);
        let start = first_visible(parlays, selected, area.height);

        let mut y = area.y;
        let bottom = area.y + area.height;
        for (index, tracked) in parlays.iter().enumerate().skip(start) {
            if y >= bottom {
                break;
            }
            let height = table_height(tracked).min(bottom - y);
            let slot = Rect {
                x: area.x,
                y,
                width: area.width,
                height,
            };
            let highlighted = store.app.focus == Focus::Parlays && index == selected;
            render_parlay(frame, slot, tracked, highlighted, &config.theme);
            y += height;
        }
    }
}

fn render_parlay(
    frame: &mut Frame,
    area: Rect,
    tracked: &TrackedParlay,
    highlighted: bool,
    theme: &ThemeConfig,
) {
    let header_cells = ["Matchup", "Bet", "Line", "Score", "Status"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1);

    let rows = tracked
        .monitors
        .iter()
        .map(|monitor| bet_row(&monitor.current_state(), monitor.bet(), theme));

    let border_style = if highlighted {
        Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!(
                " Parlay {} · {} bets · {} live ",
                short_id(tracked.parlay.id),
                tracked.parlay.bets.len(),
                tracked.live_monitors()
            ))
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(table, area);
}

/// What a single bet row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BetRowView {
    Loading,
    Failed,
    Ready {
        matchup: String,
        team: String,
        line: String,
        score: String,
        status: BetStatus,
        class: RowClass,
    },
}

impl BetRowView {
    fn of(state: &BetRuntimeState, bet: &Bet) -> Self {
        if state.loading {
            return Self::Loading;
        }
        if state.has_error() {
            return Self::Failed;
        }
        Self::Ready {
            matchup: state.matchup.clone(),
            team: state.bet_team_name.clone(),
            line: format_line(bet.line),
            score: state.score.to_string(),
            status: state.status,
            class: classify(state, bet.side, bet.line),
        }
    }
}

fn bet_row(state: &BetRuntimeState, bet: &Bet, theme: &ThemeConfig) -> Row<'static> {
    match BetRowView::of(state, bet) {
        BetRowView::Loading => Row::new(vec![Cell::from("Loading...")]).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
        BetRowView::Failed => Row::new(vec![Cell::from("Something went wrong!")])
            .style(Style::default().fg(Color::Red)),
        BetRowView::Ready {
            matchup,
            team,
            line,
            score,
            status,
            class,
        } => Row::new(vec![
            Cell::from(matchup),
            Cell::from(team),
            Cell::from(line),
            Cell::from(score),
            Cell::from(status.label()),
        ])
        .style(Style::default().fg(theme.row_color(class))),
    }
}

/// Lines are shown signed, the way spreads are quoted.
fn format_line(line: Decimal) -> String {
    let line = line.normalize();
    if line.is_sign_positive() && !line.is_zero() {
        format!("+{}", line)
    } else {
        line.to_string()
    }
}

fn table_height(tracked: &TrackedParlay) -> u16 {
    // borders + header + one row per bet
    (tracked.monitors.len() as u16).saturating_add(3)
}

/// Index of the first parlay to draw so that `selected` fits in `height`.
fn first_visible(parlays: &[TrackedParlay], selected: usize, height: u16) -> usize {
    let mut start = selected.min(parlays.len().saturating_sub(1));
    let mut used = parlays.get(start).map_or(0, table_height);
    while start > 0 {
        let above = table_height(&parlays[start - 1]);
        if used.saturating_add(above) > height {
            break;
        }
        used += above;
        start -= 1;
    }
    start
}
