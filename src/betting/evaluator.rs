//! Bet outcome rules.
//!
//! Turns a score snapshot plus a bet's side and line into a [`BetStatus`],
//! and a monitor's runtime state into the row class the dashboard paints.
//! Both go through [`standing`], so the settled rule and the live rule are
//! the same comparison.

use super::monitor::BetRuntimeState;
use super::types::{BetStatus, GameStatus, Score, ScoreSnapshot, Side};
use rust_decimal::Decimal;

/// Where a bet stands once the line is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Ahead,
    Level,
    Behind,
}

/// Compare line-adjusted scores from the point of view of `side`.
///
/// The home score is adjusted by `line`, signed by the side. A missing score,
/// or a line too large to apply, fails every comparison and lands on `Behind`.
pub fn standing(score: Score, side: Side, line: Decimal) -> Standing {
    let (Some(home), Some(away)) = (score.home, score.away) else {
        return Standing::Behind;
    };

    let Some(adjusted_home) = side
        .line_sign()
        .checked_mul(line)
        .and_then(|signed| Decimal::from(home).checked_add(signed))
    else {
        return Standing::Behind;
    };
    let away = Decimal::from(away);

    match side {
        Side::Home if adjusted_home > away => Standing::Ahead,
        Side::Away if adjusted_home < away => Standing::Ahead,
        _ if adjusted_home == away => Standing::Level,
        _ => Standing::Behind,
    }
}

/// Evaluate a bet against a snapshot.
pub fn evaluate(snapshot: &ScoreSnapshot, side: Side, line: Decimal) -> BetStatus {
    match snapshot.game_status {
        GameStatus::InProgress => BetStatus::InProgress,
        GameStatus::PreGame => BetStatus::NotStarted,
        GameStatus::GameEnd => match standing(snapshot.score, side, line) {
            Standing::Ahead => BetStatus::Won,
            Standing::Level => BetStatus::Push,
            Standing::Behind => BetStatus::Lost,
        },
        GameStatus::Other(_) => BetStatus::InProgress,
    }
}

/// Name of the competitor the bet is on, or an empty string.
pub fn competitor_name(snapshot: &ScoreSnapshot, side: Side) -> String {
    let wanted = side.competitor_side();
    snapshot
        .competitors
        .iter()
        .find(|c| c.side == wanted)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

/// Presentation class of a bet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowClass {
    Tied,
    Won,
    Lost,
    Winning,
    Losing,
}

/// Classify a bet row for display.
///
/// `Push` has no class of its own; like `InProgress` it is painted from the
/// live margin, which for a push is level.
pub fn classify(state: &BetRuntimeState, side: Side, line: Decimal) -> RowClass {
    match state.status {
        BetStatus::NotStarted => RowClass::Tied,
        BetStatus::Won => RowClass::Won,
        BetStatus::Lost => RowClass::Lost,
        BetStatus::InProgress | BetStatus::Push => match standing(state.score, side, line) {
            Standing::Ahead => RowClass::Winning,
            Standing::Level => RowClass::Tied,
            Standing::Behind => RowClass::Losing,
        },
    }
}
