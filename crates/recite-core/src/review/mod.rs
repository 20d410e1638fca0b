//! Review sequencer - the session state machine
//!
//! Orchestrates the deck trees, iterator, scheduling algorithm, histogram,
//! and postponement list to answer "what is the current card", advance
//! state on a recall response, compute per-topic statistics, and edit
//! question text.
//!
//! Two deck trees are bound per session: the *original* snapshot (total
//! counts only) and the *remaining* work queue, which shrinks as cards are
//! processed. In-memory state is mutated synchronously before any durable
//! write is awaited and is never rolled back on a write failure.

mod stats;

pub use stats::DeckStats;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::{Card, Note, Question, QuestionBank, QuestionId, ReviewResponse, ScheduleInfo};
use crate::deck::{CardOrder, Deck, DeckTreeIterator, TopicPath};
use crate::histogram::DueDateHistogram;
use crate::postpone::PostponementList;
use crate::scheduler::SchedulingAlgorithm;
use crate::store::{Clock, ReviewStore, StoreError, SystemClock};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Sequencer error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SequencerError {
    /// Durable write rejected; in-memory state has already advanced
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// The two session trees disagree on a topic path
    #[error("Deck trees disagree on topic path: {0}")]
    TopologyMismatch(TopicPath),
    /// Topic path absent from the session trees
    #[error("Unknown topic path: {0}")]
    UnknownTopic(TopicPath),
}

/// Sequencer result type
pub type Result<T> = std::result::Result<T, SequencerError>;

// ============================================================================
// MODES AND SETTINGS
// ============================================================================

/// What kind of session is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    /// Standard spaced repetition: responses update persisted schedules
    /// and the histogram
    Review,
    /// Schedule-agnostic drilling: cards repeat until marked Easy
    Cram,
}

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSettings {
    /// Postpone a reviewed question's sibling cards to the next session
    pub bury_sibling_cards: bool,
    /// Queue order within each deck
    pub card_order: CardOrder,
}

// ============================================================================
// SEQUENCER
// ============================================================================

/// Drives one review session over a pair of deck trees.
///
/// Generic over the [`ReviewStore`] performing the durable writes. The
/// caller awaits each review action to completion before triggering the
/// next; the sequencer holds no queue of pending operations.
pub struct ReviewSequencer<S: ReviewStore> {
    mode: ReviewMode,
    settings: ReviewSettings,
    algorithm: Box<dyn SchedulingAlgorithm>,
    clock: Box<dyn Clock>,
    store: S,
    bank: QuestionBank,
    original: Deck,
    /// Owns the remaining tree
    iterator: DeckTreeIterator,
    postponed: PostponementList,
    histogram: DueDateHistogram,
}

impl<S: ReviewStore> ReviewSequencer<S> {
    /// Create a sequencer with empty trees; call [`set_deck_tree`] before
    /// reviewing.
    ///
    /// [`set_deck_tree`]: ReviewSequencer::set_deck_tree
    pub fn new(
        mode: ReviewMode,
        settings: ReviewSettings,
        algorithm: Box<dyn SchedulingAlgorithm>,
        store: S,
    ) -> Self {
        Self {
            mode,
            iterator: DeckTreeIterator::new(Deck::root(), settings.card_order),
            settings,
            algorithm,
            clock: Box::new(SystemClock),
            store,
            bank: QuestionBank::new(),
            original: Deck::root(),
            postponed: PostponementList::new(),
            histogram: DueDateHistogram::new(),
        }
    }

    /// Replace the clock (tests, replays)
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Start from a previously persisted postponement list
    pub fn with_postponement_list(mut self, postponed: PostponementList) -> Self {
        self.postponed = postponed;
        self
    }

    /// Start from a pre-built due-date histogram
    pub fn with_histogram(mut self, histogram: DueDateHistogram) -> Self {
        self.histogram = histogram;
        self
    }

    // ========================================================================
    // SESSION BINDING
    // ========================================================================

    /// Bind the session's trees and advance to the first available card.
    ///
    /// Both trees must expose the same set of topic paths; a mismatch is
    /// rejected before any state changes.
    pub fn set_deck_tree(
        &mut self,
        bank: QuestionBank,
        original: Deck,
        remaining: Deck,
    ) -> Result<()> {
        let original_paths: HashSet<TopicPath> = original.topic_paths().into_iter().collect();
        let remaining_paths: HashSet<TopicPath> = remaining.topic_paths().into_iter().collect();
        if let Some(path) = original_paths
            .symmetric_difference(&remaining_paths)
            .next()
        {
            return Err(SequencerError::TopologyMismatch(path.clone()));
        }

        self.bank = bank;
        self.original = original;
        self.iterator.set_base_deck(remaining);
        self.iterator.next_card();
        debug!(
            cards = self.iterator.base_deck().total_card_count(true),
            "session trees bound"
        );
        Ok(())
    }

    /// Restrict review to the subtree at `path` and advance to its first
    /// card.
    pub fn set_current_deck(&mut self, path: &TopicPath) -> Result<()> {
        if !self.iterator.set_topic_path(path) {
            return Err(SequencerError::UnknownTopic(path.clone()));
        }
        self.iterator.next_card();
        Ok(())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Whether a card is available for review
    pub fn has_current_card(&self) -> bool {
        self.iterator.has_current_card()
    }

    /// The current card; `None` exactly when the restricted queue is
    /// exhausted
    pub fn current_card(&self) -> Option<&Card> {
        self.iterator.current_card()
    }

    /// The current card's question
    pub fn current_question(&self) -> Option<&Question> {
        self.current_card().map(|c| self.bank.question(c.question))
    }

    /// The note owning the current card's question
    pub fn current_note(&self) -> Option<&Note> {
        self.current_card().map(|c| self.bank.note_of(c.question))
    }

    /// The deck holding the current card
    pub fn current_deck(&self) -> Option<&Deck> {
        self.iterator.current_deck()
    }

    /// The session mode
    pub fn mode(&self) -> ReviewMode {
        self.mode
    }

    /// The remaining work-queue tree
    pub fn remaining_deck(&self) -> &Deck {
        self.iterator.base_deck()
    }

    /// The due-date histogram
    pub fn histogram(&self) -> &DueDateHistogram {
        &self.histogram
    }

    /// The session's postponement list
    pub fn postponement_list(&self) -> &PostponementList {
        &self.postponed
    }

    /// The durable-write collaborator
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable store access
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // ========================================================================
    // REVIEW ACTIONS
    // ========================================================================

    /// Remove the current card's question (all sibling cards) from every
    /// deck without touching schedules, and advance.
    ///
    /// # Panics
    ///
    /// Panics when there is no current card; check [`has_current_card`]
    /// first.
    ///
    /// [`has_current_card`]: ReviewSequencer::has_current_card
    pub fn skip_current_card(&mut self) {
        assert!(
            self.iterator.has_current_card(),
            "skip_current_card requires a current card"
        );
        debug!("skipping current question");
        self.iterator.delete_current_question_from_all_decks();
    }

    /// Compute the schedule a response would produce for a card, without
    /// mutating anything.
    ///
    /// Three-way dispatch: Reset ignores prior state entirely; a scheduled
    /// card updates from its old schedule; a new card seeds from its note.
    pub fn determine_card_schedule(&self, response: ReviewResponse, card: &Card) -> ScheduleInfo {
        let today = self.clock.today();
        if response == ReviewResponse::Reset {
            return self.algorithm.reset_schedule(today);
        }
        match &card.schedule {
            Some(old) => self
                .algorithm
                .updated_schedule(response, old, &self.histogram, today),
            None => self.algorithm.newcard_schedule(
                response,
                self.bank.note_path_of(card.question),
                &self.histogram,
                today,
            ),
        }
    }

    /// Apply a recall response to the current card and advance.
    ///
    /// In-memory state (tree membership, histogram, postponement list) is
    /// mutated before each durable write is awaited; a write failure
    /// propagates with state already advanced and is not rolled back.
    ///
    /// # Panics
    ///
    /// Panics when there is no current card; check [`has_current_card`]
    /// first.
    ///
    /// [`has_current_card`]: ReviewSequencer::has_current_card
    pub async fn process_review(&mut self, response: ReviewResponse) -> Result<()> {
        let card = self
            .iterator
            .current_card()
            .cloned()
            .expect("process_review requires a current card");
        debug!(response = %response, mode = ?self.mode, "processing review");
        match self.mode {
            ReviewMode::Review => self.process_review_review_mode(response, card).await,
            ReviewMode::Cram => {
                self.process_review_cram_mode(response);
                Ok(())
            }
        }
    }

    async fn process_review_review_mode(
        &mut self,
        response: ReviewResponse,
        card: Card,
    ) -> Result<()> {
        let today = self.clock.today();

        // Resetting a brand-new card is a scheduling no-op; everything else
        // produces a schedule, adjusts the histogram, and persists.
        if response != ReviewResponse::Reset || card.has_schedule() {
            let schedule = self.determine_card_schedule(response, &card);
            if let Some(current) = self.iterator.current_card_mut() {
                current.schedule = Some(schedule);
            }
            if let Some(old) = card.schedule {
                self.histogram.decrement(old.day_offset(today));
            }
            self.histogram.increment(i64::from(schedule.interval));

            let question = self.bank.question(card.question).clone();
            let cards = self.question_cards_snapshot(card.question);
            self.store
                .write_question_schedule(&question, &cards)
                .await?;
        }

        match response {
            ReviewResponse::Reset => {
                // Revisit later this session instead of removing
                self.iterator.move_current_card_to_end_of_list();
                self.iterator.next_card();
            }
            _ if self.settings.bury_sibling_cards => {
                let siblings = self
                    .iterator
                    .current_deck()
                    .map(|d| d.question_card_count(card.question, false))
                    .unwrap_or(0);
                // Single-card questions never pollute the list
                if siblings > 1 {
                    let key = self.bank.question_key(card.question);
                    self.postponed.add(key);
                    self.store.write_postponement_list(&self.postponed).await?;
                }
                self.iterator.delete_current_question_from_all_decks();
            }
            _ => self.iterator.delete_current_card_from_all_decks(),
        }
        Ok(())
    }

    fn process_review_cram_mode(&mut self, response: ReviewResponse) {
        match response {
            // Easy retires the card for this session
            ReviewResponse::Easy => self.iterator.delete_current_card_from_all_decks(),
            // Everything else drills it again later
            _ => {
                self.iterator.move_current_card_to_end_of_list();
                self.iterator.next_card();
            }
        }
    }

    /// Replace the current question's text and persist it. No scheduling
    /// effect.
    ///
    /// # Panics
    ///
    /// Panics when there is no current card; check [`has_current_card`]
    /// first.
    ///
    /// [`has_current_card`]: ReviewSequencer::has_current_card
    pub async fn update_current_question_text(&mut self, text: impl Into<String>) -> Result<()> {
        let id = self
            .iterator
            .current_card()
            .expect("update_current_question_text requires a current card")
            .question;
        self.bank.question_mut(id).text = text.into();
        let question = self.bank.question(id).clone();
        self.store.write_question_text(&question).await?;
        Ok(())
    }

    // ========================================================================
    // STATISTICS
    // ========================================================================

    /// Aggregate counts for one topic path, combining both trees.
    ///
    /// Pure and recomputed per call; safe to invoke on every UI refresh.
    pub fn get_deck_stats(&self, path: &TopicPath) -> Result<DeckStats> {
        let original = self
            .original
            .find(path)
            .ok_or_else(|| SequencerError::UnknownTopic(path.clone()))?;
        let remaining = self
            .iterator
            .base_deck()
            .find(path)
            .ok_or_else(|| SequencerError::UnknownTopic(path.clone()))?;
        Ok(DeckStats::compute(original, remaining))
    }

    /// Descendant decks under `path` that still have queued cards of their
    /// own (see [`Deck::sub_decks_with_cards_in_queue`])
    pub fn sub_decks_with_cards_in_queue(&self, path: &TopicPath) -> Result<Vec<&Deck>> {
        let remaining = self
            .iterator
            .base_deck()
            .find(path)
            .ok_or_else(|| SequencerError::UnknownTopic(path.clone()))?;
        Ok(remaining.sub_decks_with_cards_in_queue())
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    /// Current schedules of every card of a question in the remaining
    /// tree, deduplicated by card identity; the copy under the cursor wins.
    fn question_cards_snapshot(&self, question: QuestionId) -> Vec<Card> {
        let mut all = Vec::new();
        self.iterator
            .base_deck()
            .collect_question_cards(question, &mut all);
        let mut by_index: BTreeMap<usize, Card> = BTreeMap::new();
        for card in all {
            by_index.insert(card.card_index, card);
        }
        if let Some(current) = self.iterator.current_card() {
            if current.question == question {
                by_index.insert(current.card_index, current.clone());
            }
        }
        by_index.into_values().collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
