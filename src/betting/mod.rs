//! Bet evaluation and live monitoring.
//!
//! - [`types`]: bets, parlays, statuses and score snapshots
//! - [`evaluator`]: pure outcome and row classification rules
//! - [`monitor`]: per-bet polling against a [`ScoreFeed`](crate::api::ScoreFeed)

pub mod evaluator;
pub mod monitor;
pub mod types;

pub use evaluator::{RowClass, Standing, classify, competitor_name, evaluate, standing};
pub use monitor::{BetMonitor, BetRuntimeState, MonitorPhase, MonitorState, POLL_INTERVAL};
pub use types::{
    Bet, BetKey, BetStatus, Competitor, CompetitorSide, GameStatus, Parlay, ParlayId, Score,
    ScoreSnapshot, Side,
};
