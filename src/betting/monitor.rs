//! Live bet monitor.
//!
//! A [`BetMonitor`] owns the polling lifecycle of one bet: it fetches a
//! snapshot as soon as it is activated, then once per [`POLL_INTERVAL`],
//! and stops for good once the bet is resolved or the monitor is
//! deactivated.
//!
//! Runtime state is published through a `watch` channel. The polling task
//! and [`BetMonitor::deactivate`] both go through `send_if_modified`, so a
//! response that lands after deactivation is dropped instead of applied.

use super::evaluator::{competitor_name, evaluate};
use super::types::{Bet, BetKey, BetStatus, Score, ScoreSnapshot};
use crate::api::ScoreFeed;
use crate::error::FeedError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Time between two fetches of the same bet.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// What the dashboard knows about one bet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetRuntimeState {
    pub score: Score,
    pub status: BetStatus,
    /// True until the first fetch completes, successfully or not.
    pub loading: bool,
    /// Message of the last failed fetch.
    pub error: Option<String>,
    pub matchup: String,
    pub bet_team_name: String,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for BetRuntimeState {
    fn default() -> Self {
        Self {
            score: Score::zero(),
            status: BetStatus::NotStarted,
            loading: true,
            error: None,
            matchup: String::new(),
            bet_team_name: String::new(),
            last_updated: None,
        }
    }
}

impl BetRuntimeState {
    /// Apply a successful snapshot for `bet`.
    fn apply_snapshot(&mut self, snapshot: &ScoreSnapshot, bet: &Bet) {
        self.score = snapshot.score;
        self.status = evaluate(snapshot, bet.side, bet.line);
        self.matchup = snapshot.description.clone();
        self.bet_team_name = competitor_name(snapshot, bet.side);
        self.loading = false;
        self.error = None;
        self.last_updated = Some(Utc::now());
    }

    /// Record a failed fetch. Status and score are left alone.
    fn apply_error(&mut self, error: &FeedError) {
        self.error = Some(error.to_string());
        self.loading = false;
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Lifecycle phase of a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorPhase {
    #[default]
    Idle,
    Polling,
    Resolved,
    /// Last fetch failed; the next tick retries.
    Errored,
    Terminated,
}

impl MonitorPhase {
    /// Whether the monitor will still issue fetches.
    pub fn is_live(self) -> bool {
        matches!(self, MonitorPhase::Polling | MonitorPhase::Errored)
    }
}

/// Value published on a monitor's watch channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    pub runtime: BetRuntimeState,
    pub phase: MonitorPhase,
}

/// Polls the score feed for one bet.
pub struct BetMonitor {
    key: BetKey,
    bet: Bet,
    feed: Arc<dyn ScoreFeed>,
    state: Arc<watch::Sender<MonitorState>>,
    task: Option<JoinHandle<()>>,
}

impl BetMonitor {
    /// Create an idle monitor.
    pub fn new(key: BetKey, bet: Bet, feed: Arc<dyn ScoreFeed>) -> Self {
        let (state, _) = watch::channel(MonitorState::default());
        Self {
            key,
            bet,
            feed,
            state: Arc::new(state),
            task: None,
        }
    }

    pub fn key(&self) -> BetKey {
        self.key
    }

    pub fn bet(&self) -> &Bet {
        &self.bet
    }

    /// Start polling. Must be called from within a tokio runtime.
    ///
    /// Only an idle monitor can be activated; later calls do nothing.
    pub fn activate(&mut self) {
        let started = self.state.send_if_modified(|state| {
            if state.phase != MonitorPhase::Idle {
                return false;
            }
            state.phase = MonitorPhase::Polling;
            true
        });
        if !started {
            return;
        }

        info!(
            event_id = %self.bet.event_id,
            side = %self.bet.side,
            line = %self.bet.line,
            "bet monitor activated"
        );

        let task = PollTask {
            key: self.key,
            bet: self.bet.clone(),
            feed: Arc::clone(&self.feed),
            state: Arc::clone(&self.state),
        };
        self.task = Some(tokio::spawn(task.run()));
    }

    /// Stop polling for good. Safe to call any number of times.
    pub fn deactivate(&mut self) {
        let stopped = self.state.send_if_modified(|state| {
            if state.phase == MonitorPhase::Terminated {
                return false;
            }
            state.phase = MonitorPhase::Terminated;
            true
        });

        if let Some(task) = self.task.take() {
            task.abort();
        }

        if stopped {
            debug!(event_id = %self.bet.event_id, "bet monitor deactivated");
        }
    }

    /// Copy of the current runtime state.
    pub fn current_state(&self) -> BetRuntimeState {
        self.state.borrow().runtime.clone()
    }

    pub fn phase(&self) -> MonitorPhase {
        self.state.borrow().phase
    }

    /// Receiver that is notified every time the state changes.
    pub fn subscribe(&self) -> watch::Receiver<MonitorState> {
        self.state.subscribe()
    }
}

impl Drop for BetMonitor {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// The spawned half of a monitor.
struct PollTask {
    key: BetKey,
    bet: Bet,
    feed: Arc<dyn ScoreFeed>,
    state: Arc<watch::Sender<MonitorState>>,
}

impl PollTask {
    async fn run(self) {
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick completes immediately.
        loop {
            ticker.tick().await;
            if !self.poll_once().await {
                break;
            }
        }

        debug!(
            parlay = %self.key.parlay_id,
            index = self.key.index,
            "bet monitor stopped polling"
        );
    }

    /// One fetch-and-apply cycle. Returns whether polling should continue.
    async fn poll_once(&self) -> bool {
        let (phase, status) = {
            let current = self.state.borrow();
            (current.phase, current.runtime.status)
        };
        if phase == MonitorPhase::Terminated || status.is_resolved() {
            return false;
        }

        let result = self.feed.fetch_snapshot(&self.bet.event_id).await;

        let mut keep_polling = true;
        let applied = self.state.send_if_modified(|state| {
            if state.phase == MonitorPhase::Terminated {
                keep_polling = false;
                return false;
            }
            match &result {
                Ok(snapshot) => {
                    state.runtime.apply_snapshot(snapshot, &self.bet);
                    if state.runtime.status.is_resolved() {
                        state.phase = MonitorPhase::Resolved;
                        keep_polling = false;
                    } else {
                        state.phase = MonitorPhase::Polling;
                    }
                }
                Err(error) => {
                    state.runtime.apply_error(error);
                    state.phase = MonitorPhase::Errored;
                }
            }
            true
        });

        if !applied {
            debug!(event_id = %self.bet.event_id, "discarding response for deactivated monitor");
            return false;
        }

        match &result {
            Ok(_) => {
                let status = self.state.borrow().runtime.status;
                if status.is_resolved() {
                    info!(event_id = %self.bet.event_id, status = status.label(), "bet resolved");
                } else {
                    debug!(event_id = %self.bet.event_id, status = status.label(), "bet updated");
                }
            }
            Err(error) => {
                warn!(
                    event_id = %self.bet.event_id,
                    kind = ?error.kind,
                    error = %error,
                    "score fetch failed, retrying next interval"
                );
            }
        }

        keep_polling
    }
}
