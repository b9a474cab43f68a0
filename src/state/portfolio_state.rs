//! Portfolio of parlays and the monitors that watch them.

use super::entry_state::{EntryBook, EntryId};
use crate::api::ScoreFeed;
use crate::betting::{BetKey, BetMonitor, Parlay, ParlayId};
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

/// A committed parlay with one live monitor per bet.
pub struct TrackedParlay {
    pub parlay: Parlay,
    /// Monitors, in bet order.
    pub monitors: Vec<BetMonitor>,
}

impl TrackedParlay {
    fn start(parlay: Parlay, feed: Arc<dyn ScoreFeed>) -> Self {
        let monitors = parlay
            .keys()
            .zip(parlay.bets.iter())
            .map(|(key, bet)| {
                let mut monitor = BetMonitor::new(key, bet.clone(), Arc::clone(&feed));
                monitor.activate();
                monitor
            })
            .collect();

        Self { parlay, monitors }
    }

    fn shutdown(&mut self) {
        for monitor in &mut self.monitors {
            monitor.deactivate();
        }
    }

    /// Number of monitors still polling.
    pub fn live_monitors(&self) -> usize {
        self.monitors.iter().filter(|m| m.phase().is_live()).count()
    }
}

impl std::fmt::Debug for TrackedParlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedParlay")
            .field("parlay", &self.parlay)
            .finish_non_exhaustive()
    }
}

/// Portfolio state: pending entries plus committed parlays.
#[derive(Debug, Default)]
pub struct PortfolioState {
    /// Bet rows not yet committed.
    pub entries: EntryBook,
    parlays: Vec<TrackedParlay>,
    /// Currently selected parlay index.
    pub selected_parlay: Option<usize>,
}

impl PortfolioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank pending entry.
    pub fn add_entry(&mut self) -> EntryId {
        self.entries.add()
    }

    pub fn remove_entry(&mut self, id: EntryId) -> Result<()> {
        self.entries.remove(id).map(|_| ())
    }

    pub fn set_event_id(&mut self, id: EntryId, text: impl Into<String>) -> Result<()> {
        self.entries.set_event_id(id, text)
    }

    pub fn set_home(&mut self, id: EntryId, home: bool) -> Result<()> {
        self.entries.set_home(id, home)
    }

    pub fn toggle_home(&mut self, id: EntryId) -> Result<()> {
        self.entries.toggle_home(id)
    }

    pub fn set_line(&mut self, id: EntryId, text: impl Into<String>) -> Result<()> {
        self.entries.set_line(id, text)
    }

    /// Turn the pending entries into a parlay and start watching it.
    ///
    /// All entries are validated first; on any error nothing changes. Must be
    /// called from within a tokio runtime.
    pub fn commit_parlay(&mut self, feed: Arc<dyn ScoreFeed>) -> Result<ParlayId> {
        if self.entries.is_empty() {
            return Err(Error::invalid_input("add at least one bet before committing"));
        }
        let bets = self.entries.to_bets()?;

        let parlay = Parlay::new(bets);
        let id = parlay.id;
        info!(parlay = %id, bets = parlay.bets.len(), "parlay committed");

        self.parlays.push(TrackedParlay::start(parlay, feed));
        self.entries.clear();
        self.selected_parlay = Some(self.parlays.len() - 1);
        Ok(id)
    }

    /// Stop watching a parlay and forget it.
    pub fn remove_parlay(&mut self, id: ParlayId) -> Result<()> {
        let index = self
            .parlays
            .iter()
            .position(|p| p.parlay.id == id)
            .ok_or_else(|| Error::invalid_input(format!("no parlay {}", id)))?;

        let mut removed = self.parlays.remove(index);
        removed.shutdown();
        info!(parlay = %id, "parlay removed");

        self.selected_parlay = if self.parlays.is_empty() {
            None
        } else {
            self.selected_parlay.map(|s| s.min(self.parlays.len() - 1))
        };
        Ok(())
    }

    pub fn entries(&self) -> &EntryBook {
        &self.entries
    }

    pub fn parlays(&self) -> &[TrackedParlay] {
        &self.parlays
    }

    pub fn parlay(&self, id: ParlayId) -> Option<&TrackedParlay> {
        self.parlays.iter().find(|p| p.parlay.id == id)
    }

    pub fn selected_parlay(&self) -> Option<&TrackedParlay> {
        self.selected_parlay.and_then(|i| self.parlays.get(i))
    }

    /// Monitor of a single bet.
    pub fn monitor(&self, key: BetKey) -> Option<&BetMonitor> {
        self.parlay(key.parlay_id)
            .and_then(|p| p.monitors.get(key.index))
    }

    /// Number of monitors still polling, across all parlays.
    pub fn live_monitor_count(&self) -> usize {
        self.parlays.iter().map(TrackedParlay::live_monitors).sum()
    }

    /// Move the parlay selection by `delta`, clamped.
    pub fn move_parlay_selection(&mut self, delta: i32) {
        if self.parlays.is_empty() {
            self.selected_parlay = None;
            return;
        }
        let current = self.selected_parlay.unwrap_or(0) as i32;
        let max_index = self.parlays.len().saturating_sub(1) as i32;
        self.selected_parlay = Some((current + delta).clamp(0, max_index) as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockScoreFeed;
    use crate::betting::{
        BetStatus, Competitor, CompetitorSide, GameStatus, MonitorPhase, Score, ScoreSnapshot,
        Side,
    };
    use rust_decimal_macros::dec;
    use tokio_test::{assert_err, assert_ok};

    fn in_progress_feed() -> Arc<dyn ScoreFeed> {
        let mut mock = MockScoreFeed::new();
        mock.expect_fetch_snapshot().returning(|_| {
            Ok(ScoreSnapshot {
                event_id: 7,
                score: Score::new(3, 0),
                game_status: GameStatus::InProgress,
                description: "Visitors @ Hosts".to_string(),
                competitors: vec![Competitor {
                    name: "Hosts".to_string(),
                    side: CompetitorSide::Home,
                }],
            })
        });
        Arc::new(mock)
    }

    fn fill_two_entries(portfolio: &mut PortfolioState) -> (EntryId, EntryId) {
        let a = portfolio.add_entry();
        portfolio.set_event_id(a, "1001").unwrap();
        portfolio.set_home(a, true).unwrap();
        portfolio.set_line(a, "-3").unwrap();

        let b = portfolio.add_entry();
        portfolio.set_event_id(b, "1002").unwrap();
        portfolio.set_line(b, "6.5").unwrap();
        (a, b)
    }

    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_builds_parlay_and_clears_entries() {
        let mut portfolio = PortfolioState::new();
        fill_two_entries(&mut portfolio);

        let id = assert_ok!(portfolio.commit_parlay(in_progress_feed()));
        assert!(portfolio.entries.is_empty());
        assert_eq!(portfolio.selected_parlay, Some(0));

        let tracked = portfolio.parlay(id).unwrap();
        assert_eq!(tracked.parlay.bets.len(), 2);
        assert_eq!(tracked.parlay.bets[0].side, Side::Home);
        assert_eq!(tracked.parlay.bets[0].line, dec!(-3));
        assert_eq!(tracked.parlay.bets[1].side, Side::Away);
        assert_eq!(tracked.parlay.bets[1].line, dec!(6.5));
        assert_eq!(tracked.monitors.len(), 2);

        settle().await;
        let key = BetKey {
            parlay_id: id,
            index: 0,
        };
        let state = portfolio.monitor(key).unwrap().current_state();
        assert_eq!(state.status, BetStatus::InProgress);
        assert_eq!(state.bet_team_name, "Hosts");
        assert_eq!(portfolio.live_monitor_count(), 2);
    }

    #[tokio::test]
    async fn test_commit_is_atomic_on_bad_line() {
        let mut portfolio = PortfolioState::new();
        let (_, b) = fill_two_entries(&mut portfolio);
        portfolio.set_line(b, "six").unwrap();

        let err = assert_err!(portfolio.commit_parlay(in_progress_feed()));
        assert!(matches!(err, Error::InputParse { entry, .. } if entry == b));
        assert_eq!(portfolio.entries.len(), 2);
        assert!(portfolio.parlays().is_empty());
    }

    #[tokio::test]
    async fn test_commit_without_entries_is_rejected() {
        let mut portfolio = PortfolioState::new();
        assert_err!(portfolio.commit_parlay(in_progress_feed()));
        assert!(portfolio.parlays().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_parlay_ids_are_unique() {
        let mut portfolio = PortfolioState::new();
        fill_two_entries(&mut portfolio);
        let first = portfolio.commit_parlay(in_progress_feed()).unwrap();
        fill_two_entries(&mut portfolio);
        let second = portfolio.commit_parlay(in_progress_feed()).unwrap();

        assert_ne!(first, second);
        assert_eq!(portfolio.parlays().len(), 2);
        assert_eq!(portfolio.selected_parlay, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_event_twice_gets_distinct_monitors() {
        let mut portfolio = PortfolioState::new();
        let a = portfolio.add_entry();
        portfolio.set_event_id(a, "555").unwrap();
        let b = portfolio.add_entry();
        portfolio.set_event_id(b, "555").unwrap();
        portfolio.set_home(b, true).unwrap();

        let id = portfolio.commit_parlay(in_progress_feed()).unwrap();
        let tracked = portfolio.parlay(id).unwrap();
        let keys: Vec<_> = tracked.monitors.iter().map(BetMonitor::key).collect();
        assert_eq!(keys.len(), 2);
        assert_ne!(keys[0], keys[1]);
        assert_eq!(tracked.monitors[0].bet().side, Side::Away);
        assert_eq!(tracked.monitors[1].bet().side, Side::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_parlay_deactivates_monitors() {
        let mut portfolio = PortfolioState::new();
        fill_two_entries(&mut portfolio);
        let id = portfolio.commit_parlay(in_progress_feed()).unwrap();
        settle().await;

        let mut updates = portfolio
            .monitor(BetKey {
                parlay_id: id,
                index: 1,
            })
            .unwrap()
            .subscribe();

        assert_ok!(portfolio.remove_parlay(id));
        assert!(portfolio.parlays().is_empty());
        assert_eq!(portfolio.selected_parlay, None);
        assert_eq!(portfolio.live_monitor_count(), 0);

        updates.changed().await.unwrap();
        assert_eq!(updates.borrow().phase, MonitorPhase::Terminated);

        assert!(matches!(
            portfolio.remove_parlay(id),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parlay_selection_clamps() {
        let mut portfolio = PortfolioState::new();
        portfolio.move_parlay_selection(1);
        assert_eq!(portfolio.selected_parlay, None);
    }
}
