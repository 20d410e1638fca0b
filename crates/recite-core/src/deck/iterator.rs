//! Deck-tree iterator - cursor over the remaining work queue
//!
//! The iterator owns the remaining tree and addresses the current card by
//! index, never by reference: `(deck index, queue, card index)` over a
//! precomputed preorder list of topic paths. Decks are never removed during
//! a session, so the path list stays valid; card removals shift only indices
//! at or after the cursor, and every structural mutation re-points the
//! cursor before returning.
//!
//! The queue is circular: the cursor seek wraps past the end of the
//! restriction back to its start, so a requeued card behind the cursor
//! comes around on the next lap and iteration exhausts only when no cards
//! remain under the restriction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::{Card, CardListType, QuestionId};
use crate::deck::{Deck, TopicPath};

// ============================================================================
// ITERATION ORDER
// ============================================================================

/// Which queue is drained first within each deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardOrder {
    /// New cards before due cards (default)
    #[default]
    NewFirst,
    /// Due cards before new cards
    DueFirst,
}

impl CardOrder {
    fn lists(&self) -> [CardListType; 2] {
        match self {
            CardOrder::NewFirst => [CardListType::New, CardListType::Due],
            CardOrder::DueFirst => [CardListType::Due, CardListType::New],
        }
    }

    fn rank(&self, list: CardListType) -> usize {
        self.lists().iter().position(|l| *l == list).unwrap_or(0)
    }
}

// ============================================================================
// CURSOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CursorPos {
    deck_idx: usize,
    list: CardListType,
    card_idx: usize,
}

/// Cursor state. `Before` means "the next `next_card` call starts its seek
/// at this position without advancing" - the state after a requeue or at the
/// start of a restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Before(CursorPos),
    At(CursorPos),
    Exhausted,
}

// ============================================================================
// ITERATOR
// ============================================================================

/// Cursor over a deck tree restricted to a chosen sub-topic.
///
/// Owns the remaining tree for the session. Produces the next card to
/// review and supports requeueing and removal; after any of the mutation
/// operations the cursor points at a valid card or is exhausted, with no
/// intermediate state observable.
#[derive(Debug)]
pub struct DeckTreeIterator {
    deck: Deck,
    order: CardOrder,
    /// Preorder topic paths under the current restriction
    paths: Vec<TopicPath>,
    cursor: Cursor,
}

impl DeckTreeIterator {
    /// Create an iterator over a tree, restricted to its root
    pub fn new(deck: Deck, order: CardOrder) -> Self {
        let mut iterator = Self {
            deck,
            order,
            paths: Vec::new(),
            cursor: Cursor::Exhausted,
        };
        iterator.reset_restriction();
        iterator
    }

    /// Rebind to a new tree, restricted to its root
    pub fn set_base_deck(&mut self, deck: Deck) {
        self.deck = deck;
        self.reset_restriction();
    }

    /// The whole remaining tree
    pub fn base_deck(&self) -> &Deck {
        &self.deck
    }

    /// Restrict iteration to the subtree rooted at `path`.
    ///
    /// Returns false (leaving the previous restriction untouched) when the
    /// path is not present in the tree.
    pub fn set_topic_path(&mut self, path: &TopicPath) -> bool {
        let Some(subdeck) = self.deck.find(path) else {
            return false;
        };
        self.paths = subdeck.topic_paths();
        self.cursor = Cursor::Before(self.start_pos());
        true
    }

    fn reset_restriction(&mut self) {
        self.paths = self.deck.topic_paths();
        self.cursor = Cursor::Before(self.start_pos());
    }

    fn start_pos(&self) -> CursorPos {
        CursorPos {
            deck_idx: 0,
            list: self.order.lists()[0],
            card_idx: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Whether a current card is available
    pub fn has_current_card(&self) -> bool {
        matches!(self.cursor, Cursor::At(_))
    }

    /// The current card, if any
    pub fn current_card(&self) -> Option<&Card> {
        let Cursor::At(pos) = self.cursor else {
            return None;
        };
        self.deck
            .find(&self.paths[pos.deck_idx])?
            .card_list(pos.list)
            .get(pos.card_idx)
    }

    /// Mutable access to the current card (schedule assignment)
    pub fn current_card_mut(&mut self) -> Option<&mut Card> {
        let Cursor::At(pos) = self.cursor else {
            return None;
        };
        self.deck
            .find_mut(&self.paths[pos.deck_idx])?
            .card_list_mut(pos.list)
            .get_mut(pos.card_idx)
    }

    /// The deck holding the current card, if any
    pub fn current_deck(&self) -> Option<&Deck> {
        let Cursor::At(pos) = self.cursor else {
            return None;
        };
        self.deck.find(&self.paths[pos.deck_idx])
    }

    // ========================================================================
    // ADVANCE
    // ========================================================================

    /// Advance to the next card under the current restriction.
    ///
    /// The search wraps past the end of the restriction, so a requeued card
    /// comes around again and this returns false only when the restriction
    /// holds no cards at all.
    pub fn next_card(&mut self) -> bool {
        self.cursor = match self.cursor {
            Cursor::Before(pos) => self.seek(pos),
            Cursor::At(pos) => self.seek(CursorPos {
                card_idx: pos.card_idx + 1,
                ..pos
            }),
            Cursor::Exhausted => Cursor::Exhausted,
        };
        self.has_current_card()
    }

    /// Find the first occupied position at or after `pos`, wrapping once to
    /// the start of the restriction before giving up.
    fn seek(&self, pos: CursorPos) -> Cursor {
        match self
            .seek_from(pos)
            .or_else(|| self.seek_from(self.start_pos()))
        {
            Some(found) => Cursor::At(found),
            None => Cursor::Exhausted,
        }
    }

    /// Forward scan from `pos` in iteration order, without wrapping
    fn seek_from(&self, pos: CursorPos) -> Option<CursorPos> {
        let lists = self.order.lists();
        let mut deck_idx = pos.deck_idx;
        let mut list_rank = self.order.rank(pos.list);
        let mut card_idx = pos.card_idx;

        while deck_idx < self.paths.len() {
            if let Some(deck) = self.deck.find(&self.paths[deck_idx]) {
                while list_rank < lists.len() {
                    let list = lists[list_rank];
                    if card_idx < deck.card_list(list).len() {
                        return Some(CursorPos {
                            deck_idx,
                            list,
                            card_idx,
                        });
                    }
                    list_rank += 1;
                    card_idx = 0;
                }
            }
            deck_idx += 1;
            list_rank = 0;
            card_idx = 0;
        }
        None
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Requeue the current card at the end of its deck's queue.
    ///
    /// The cursor is left *before* the position where the search resumes
    /// (normally the card that shifted into the vacated slot); the caller
    /// advances with an explicit [`next_card`] call.
    ///
    /// No-op when there is no current card.
    ///
    /// [`next_card`]: DeckTreeIterator::next_card
    pub fn move_current_card_to_end_of_list(&mut self) {
        let Cursor::At(pos) = self.cursor else {
            return;
        };
        let Some(deck) = self.deck.find_mut(&self.paths[pos.deck_idx]) else {
            return;
        };
        let cards = deck.card_list_mut(pos.list);
        if pos.card_idx >= cards.len() {
            return;
        }
        // A card already at the back stays in place after remove-then-push;
        // resume the search past it so later decks stay reachable. The wrap
        // in seek brings it around again once the rest of the lap is done.
        let was_last = pos.card_idx + 1 == cards.len();
        let card = cards.remove(pos.card_idx);
        debug!(card_index = card.card_index, "requeueing card at end of list");
        cards.push(card);
        let resume = CursorPos {
            card_idx: if was_last { pos.card_idx + 1 } else { pos.card_idx },
            ..pos
        };
        self.cursor = Cursor::Before(resume);
    }

    /// Remove exactly the current card's identity from every deck, then
    /// point at the next card (or exhaust).
    ///
    /// No-op when there is no current card.
    pub fn delete_current_card_from_all_decks(&mut self) {
        let Cursor::At(pos) = self.cursor else {
            return;
        };
        let Some(card) = self.current_card() else {
            return;
        };
        let (question, card_index) = (card.question, card.card_index);
        let removed = self.deck.remove_card(question, card_index);
        debug!(card_index, copies = removed, "deleted card from all decks");
        // The card that followed has shifted into the vacated index
        self.cursor = self.seek(pos);
    }

    /// Remove every card of the current card's question from every deck,
    /// then point at the next card (or exhaust).
    ///
    /// No-op when there is no current card.
    pub fn delete_current_question_from_all_decks(&mut self) {
        let Cursor::At(pos) = self.cursor else {
            return;
        };
        let Some(card) = self.current_card() else {
            return;
        };
        let question = card.question;
        // Sibling cards earlier in the current queue also disappear, so the
        // cursor index must shrink by however many precede it.
        let preceding = self.preceding_siblings(pos, question);
        let removed = self.deck.remove_question(question);
        debug!(?question, cards = removed, "deleted question from all decks");
        self.cursor = self.seek(CursorPos {
            card_idx: pos.card_idx - preceding,
            ..pos
        });
    }

    fn preceding_siblings(&self, pos: CursorPos, question: QuestionId) -> usize {
        let Some(deck) = self.deck.find(&self.paths[pos.deck_idx]) else {
            return 0;
        };
        deck.card_list(pos.list)[..pos.card_idx]
            .iter()
            .filter(|c| c.question == question)
            .count()
    }
}

// ============================================================================
// TESTS
// ============================================================================
