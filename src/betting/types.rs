//! Bets, parlays and score snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Which competitor a bet is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Sign applied to the line when adjusting the home score.
    pub fn line_sign(self) -> Decimal {
        match self {
            Side::Home => Decimal::ONE,
            Side::Away => Decimal::NEGATIVE_ONE,
        }
    }

    /// The feed's name for this side of the matchup.
    pub fn competitor_side(self) -> CompetitorSide {
        match self {
            Side::Home => CompetitorSide::Home,
            Side::Away => CompetitorSide::Visitor,
        }
    }

    pub fn from_home_flag(home: bool) -> Self {
        if home { Side::Home } else { Side::Away }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "Home"),
            Side::Away => write!(f, "Away"),
        }
    }
}

/// A single point-spread bet on one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    /// External event identifier, as typed by the user.
    pub event_id: String,
    pub side: Side,
    /// Point spread applied to `side`.
    pub line: Decimal,
}

impl Bet {
    pub fn new(event_id: impl Into<String>, side: Side, line: Decimal) -> Self {
        Self {
            event_id: event_id.into(),
            side,
            line,
        }
    }
}

/// Unique parlay identifier.
pub type ParlayId = Uuid;

/// Address of a bet inside the portfolio.
///
/// Event ids come from free text and may repeat; the key does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BetKey {
    pub parlay_id: ParlayId,
    pub index: usize,
}

/// A committed group of bets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parlay {
    pub id: ParlayId,
    pub bets: Vec<Bet>,
}

impl Parlay {
    /// Create a parlay with a fresh identifier.
    pub fn new(bets: Vec<Bet>) -> Self {
        Self {
            id: Uuid::new_v4(),
            bets,
        }
    }

    /// Keys of every bet in this parlay, in order.
    pub fn keys(&self) -> impl Iterator<Item = BetKey> + '_ {
        (0..self.bets.len()).map(|index| BetKey {
            parlay_id: self.id,
            index,
        })
    }
}

/// Evaluated state of a bet.
///
/// Variants are ordered by how settled they are: everything after
/// `InProgress` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BetStatus {
    #[default]
    NotStarted = 0,
    InProgress = 1,
    Won = 2,
    Lost = 3,
    Push = 4,
}

impl BetStatus {
    /// Whether the bet can no longer change.
    pub fn is_resolved(self) -> bool {
        self > BetStatus::InProgress
    }

    pub fn label(self) -> &'static str {
        match self {
            BetStatus::NotStarted => "Not started",
            BetStatus::InProgress => "In progress",
            BetStatus::Won => "Won",
            BetStatus::Lost => "Lost",
            BetStatus::Push => "Push",
        }
    }
}

/// Home and away points. `None` when the feed sent something that is not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub home: Option<i64>,
    pub away: Option<i64>,
}

impl Score {
    pub fn new(home: i64, away: i64) -> Self {
        Self {
            home: Some(home),
            away: Some(away),
        }
    }

    /// A scoreless game, the state before the first fetch.
    pub fn zero() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<i64>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
        write!(f, "{}-{}", show(self.home), show(self.away))
    }
}

/// Game status reported by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    PreGame,
    InProgress,
    GameEnd,
    /// Any status string the evaluator does not know.
    Other(String),
}

impl GameStatus {
    pub fn from_wire(status: &str) -> Self {
        match status {
            "PRE_GAME" => GameStatus::PreGame,
            "IN_PROGRESS" => GameStatus::InProgress,
            "GAME_END" => GameStatus::GameEnd,
            other => GameStatus::Other(other.to_string()),
        }
    }
}

/// Side of a competitor as recorded by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetitorSide {
    Home,
    Visitor,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competitor {
    pub name: String,
    pub side: CompetitorSide,
}

/// One point-in-time read of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSnapshot {
    pub event_id: u64,
    pub score: Score,
    pub game_status: GameStatus,
    pub description: String,
    pub competitors: Vec<Competitor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_ordering() {
        assert!(BetStatus::NotStarted < BetStatus::InProgress);
        assert!(BetStatus::InProgress < BetStatus::Won);
        assert!(BetStatus::InProgress < BetStatus::Lost);
        assert!(BetStatus::InProgress < BetStatus::Push);
    }

    #[test]
    fn test_is_resolved() {
        assert!(!BetStatus::NotStarted.is_resolved());
        assert!(!BetStatus::InProgress.is_resolved());
        assert!(BetStatus::Won.is_resolved());
        assert!(BetStatus::Lost.is_resolved());
        assert!(BetStatus::Push.is_resolved());
    }

    #[test]
    fn test_line_sign() {
        assert_eq!(Side::Home.line_sign() * dec!(-3.5), dec!(-3.5));
        assert_eq!(Side::Away.line_sign() * dec!(-3.5), dec!(3.5));
    }

    #[test]
    fn test_game_status_from_wire() {
        assert_eq!(GameStatus::from_wire("PRE_GAME"), GameStatus::PreGame);
        assert_eq!(GameStatus::from_wire("IN_PROGRESS"), GameStatus::InProgress);
        assert_eq!(GameStatus::from_wire("GAME_END"), GameStatus::GameEnd);
        assert_eq!(
            GameStatus::from_wire("HALFTIME"),
            GameStatus::Other("HALFTIME".to_string())
        );
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::new(24, 20).to_string(), "24-20");
        let partial = Score {
            home: Some(7),
            away: None,
        };
        assert_eq!(partial.to_string(), "7-?");
    }

    #[test]
    fn test_parlay_keys_are_positional() {
        let parlay = Parlay::new(vec![
            Bet::new("123", Side::Home, dec!(-3)),
            Bet::new("123", Side::Away, dec!(2.5)),
        ]);
        let keys: Vec<_> = parlay.keys().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].parlay_id, parlay.id);
        assert_ne!(keys[0], keys[1]);
    }
}
