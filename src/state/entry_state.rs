//! Pending bet entries.
//!
//! Entries are kept in an arena keyed by a stable [`EntryId`]; edits touch a
//! single field of a single entry.

use crate::betting::{Bet, Side};
use crate::error::{Error, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Stable identifier of a pending entry. Never reused.
pub type EntryId = u64;

/// Editable column of an entry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryField {
    #[default]
    EventId,
    Home,
    Line,
}

impl EntryField {
    pub fn next(self) -> Self {
        match self {
            Self::EventId => Self::Home,
            Self::Home => Self::Line,
            Self::Line => Self::EventId,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::EventId => Self::Line,
            Self::Home => Self::EventId,
            Self::Line => Self::Home,
        }
    }

    /// Whether the field is edited as text.
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Home)
    }
}

/// A bet row that has not been committed into a parlay yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    pub id: EntryId,
    /// Event id as typed.
    pub event_id: String,
    /// Bet is on the home team.
    pub home: bool,
    /// Line as typed.
    pub line: String,
}

impl PendingEntry {
    fn new(id: EntryId) -> Self {
        Self {
            id,
            event_id: String::new(),
            home: false,
            line: "0".to_string(),
        }
    }

    pub fn side(&self) -> Side {
        Side::from_home_flag(self.home)
    }

    /// Parse the typed line. A leading `+` is accepted.
    pub fn parse_line(&self) -> Result<Decimal> {
        let text = self.line.trim();
        let unsigned = text.strip_prefix('+').unwrap_or(text);
        Decimal::from_str(unsigned).map_err(|_| Error::input_parse(self.id, &self.line))
    }

    /// Build the bet this entry describes.
    pub fn to_bet(&self) -> Result<Bet> {
        let event_id = self.event_id.trim();
        if event_id.is_empty() {
            return Err(Error::invalid_input(format!(
                "Bet #{} has no event id",
                self.id
            )));
        }
        Ok(Bet::new(event_id, self.side(), self.parse_line()?))
    }

    /// Current text of a field.
    pub fn field_text(&self, field: EntryField) -> String {
        match field {
            EntryField::EventId => self.event_id.clone(),
            EntryField::Home => (if self.home { "yes" } else { "no" }).to_string(),
            EntryField::Line => self.line.clone(),
        }
    }
}

/// Arena of pending entries, in creation order.
#[derive(Debug, Default)]
pub struct EntryBook {
    entries: BTreeMap<EntryId, PendingEntry>,
    next_id: EntryId,
    /// Currently selected entry.
    pub selected: Option<EntryId>,
    /// Currently selected column.
    pub field: EntryField,
}

impl EntryBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank entry and select it.
    pub fn add(&mut self) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, PendingEntry::new(id));
        self.selected = Some(id);
        id
    }

    /// Remove an entry, moving the selection to a neighbour.
    pub fn remove(&mut self, id: EntryId) -> Result<PendingEntry> {
        let position = self.position(id);
        let removed = self
            .entries
            .remove(&id)
            .ok_or_else(|| Self::unknown(id))?;

        if self.selected == Some(id) {
            self.selected = position.and_then(|p| {
                let p = p.min(self.entries.len().saturating_sub(1));
                self.entries.keys().nth(p).copied()
            });
        }
        Ok(removed)
    }

    pub fn get(&self, id: EntryId) -> Option<&PendingEntry> {
        self.entries.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_event_id(&mut self, id: EntryId, text: impl Into<String>) -> Result<()> {
        self.entry_mut(id)?.event_id = text.into();
        Ok(())
    }

    pub fn set_home(&mut self, id: EntryId, home: bool) -> Result<()> {
        self.entry_mut(id)?.home = home;
        Ok(())
    }

    pub fn toggle_home(&mut self, id: EntryId) -> Result<()> {
        let entry = self.entry_mut(id)?;
        entry.home = !entry.home;
        Ok(())
    }

    pub fn set_line(&mut self, id: EntryId, text: impl Into<String>) -> Result<()> {
        self.entry_mut(id)?.line = text.into();
        Ok(())
    }

    /// Write text into a text field of an entry.
    pub fn set_field(&mut self, id: EntryId, field: EntryField, text: String) -> Result<()> {
        match field {
            EntryField::EventId => self.set_event_id(id, text),
            EntryField::Line => self.set_line(id, text),
            EntryField::Home => Err(Error::invalid_input("home is not a text field")),
        }
    }

    /// Convert every entry into a bet, failing on the first bad one.
    pub fn to_bets(&self) -> Result<Vec<Bet>> {
        self.entries.values().map(PendingEntry::to_bet).collect()
    }

    /// Drop all entries. Ids keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
        self.field = EntryField::default();
    }

    /// Row index of an entry.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.keys().position(|k| *k == id)
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.selected.and_then(|id| self.position(id))
    }

    /// Move the selection by `delta` rows, clamped.
    pub fn move_selection(&mut self, delta: i32) {
        if self.entries.is_empty() {
            self.selected = None;
            return;
        }
        let current = self.selected_position().unwrap_or(0) as i32;
        let max_index = self.entries.len().saturating_sub(1) as i32;
        let index = (current + delta).clamp(0, max_index) as usize;
        self.selected = self.entries.keys().nth(index).copied();
    }

    fn entry_mut(&mut self, id: EntryId) -> Result<&mut PendingEntry> {
        self.entries.get_mut(&id).ok_or_else(|| Self::unknown(id))
    }

    fn unknown(id: EntryId) -> Error {
        Error::invalid_input(format!("no pending bet #{}", id))
    }
}
