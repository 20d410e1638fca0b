//! Deck statistics
//!
//! Derived, recomputed on demand, never cached - cheap enough to call on
//! every UI refresh. Total counts come from the original (snapshot) tree;
//! queue counts from the remaining (work queue) tree.

use serde::{Deserialize, Serialize};

use crate::card::CardListType;
use crate::deck::Deck;

/// Aggregate counts for one topic path, combining both session trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    /// All cards under this topic in the original tree, recursive
    pub total_count: usize,
    /// New cards still queued, recursive
    pub new_count: usize,
    /// Due cards still queued, recursive
    pub due_count: usize,
    /// `new_count + due_count`
    pub cards_in_queue_count: usize,
    /// New cards queued in this deck only (no subdecks)
    pub new_of_this_deck_count: usize,
    /// Due cards queued in this deck only (no subdecks)
    pub due_of_this_deck_count: usize,
    /// Cards queued in this deck only (no subdecks)
    pub cards_in_queue_of_this_deck_count: usize,
    /// Descendant decks (any depth) with at least one queued card of their
    /// own
    pub sub_decks_in_queue_of_this_deck_count: usize,
    /// Same, plus one when this deck itself still has queued cards
    pub decks_in_queue_of_this_deck_count: usize,
}

impl DeckStats {
    /// Compute stats for the deck at one topic path in both trees.
    ///
    /// `original` and `remaining` must be the same topic's node in each
    /// tree.
    pub fn compute(original: &Deck, remaining: &Deck) -> Self {
        let new_count = remaining.card_count(CardListType::New, true);
        let due_count = remaining.card_count(CardListType::Due, true);
        let new_of_this_deck_count = remaining.card_count(CardListType::New, false);
        let due_of_this_deck_count = remaining.card_count(CardListType::Due, false);
        let sub_decks_in_queue = remaining.sub_decks_with_cards_in_queue().len();
        let own_queued = usize::from(remaining.has_queued_cards());

        Self {
            total_count: original.total_card_count(true),
            new_count,
            due_count,
            cards_in_queue_count: new_count + due_count,
            new_of_this_deck_count,
            due_of_this_deck_count,
            cards_in_queue_of_this_deck_count: new_of_this_deck_count + due_of_this_deck_count,
            sub_decks_in_queue_of_this_deck_count: sub_decks_in_queue,
            decks_in_queue_of_this_deck_count: sub_decks_in_queue + own_queued,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
