//! Due-date histogram
//!
//! Counts scheduled-and-not-yet-reviewed cards per day offset from "today".
//! Scheduling algorithms consult it to spread review load; the sequencer
//! pairs a decrement with an increment on every schedule change so the
//! total never drifts.
//!
//! Offsets may be negative: an overdue card decrements at
//! `ceil((due - today) / TICKS_PER_DAY)`, which lands below zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::card::{CardListType, ScheduleInfo};
use crate::deck::Deck;
use chrono::{DateTime, Utc};

/// Mutable counter mapping an offset-in-days to the number of cards due
/// that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDateHistogram {
    buckets: BTreeMap<i64, usize>,
}

impl DueDateHistogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from every due card in a tree, relative to `today`
    pub fn from_deck(deck: &Deck, today: DateTime<Utc>) -> Self {
        let mut histogram = Self::new();
        histogram.absorb(deck, today);
        histogram
    }

    fn absorb(&mut self, deck: &Deck, today: DateTime<Utc>) {
        for card in deck.card_list(CardListType::Due) {
            if let Some(schedule) = card.schedule {
                self.increment(schedule.day_offset(today));
            }
        }
        for child in &deck.children {
            self.absorb(child, today);
        }
    }

    /// Add one card at a day offset
    pub fn increment(&mut self, offset: i64) {
        *self.buckets.entry(offset).or_insert(0) += 1;
    }

    /// Remove one card at a day offset.
    ///
    /// An empty bucket is removed outright; decrementing an absent bucket
    /// is a bookkeeping bug upstream and is logged rather than panicking.
    pub fn decrement(&mut self, offset: i64) {
        match self.buckets.get_mut(&offset) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.buckets.remove(&offset);
            }
            None => warn!(offset, "decrement on empty histogram bucket"),
        }
    }

    /// Cards counted at one offset
    pub fn get(&self, offset: i64) -> usize {
        self.buckets.get(&offset).copied().unwrap_or(0)
    }

    /// Total cards across all offsets
    pub fn total(&self) -> usize {
        self.buckets.values().sum()
    }

    /// Whether the histogram tracks no cards
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterate `(offset, count)` pairs in offset order
    pub fn iter(&self) -> impl Iterator<Item = (i64, usize)> + '_ {
        self.buckets.iter().map(|(offset, count)| (*offset, *count))
    }

    /// The least-loaded offset in `lo..=hi` (inclusive).
    ///
    /// Ties resolve to the larger offset, pushing load outward. Used by
    /// scheduling algorithms to pick a due date near the computed interval.
    pub fn least_loaded_offset(&self, lo: i64, hi: i64) -> i64 {
        let mut best = lo;
        let mut best_count = usize::MAX;
        for offset in lo..=hi {
            let count = self.get(offset);
            if count <= best_count {
                best = offset;
                best_count = count;
            }
        }
        best
    }
}

// ============================================================================
// TESTS
// ============================================================================
