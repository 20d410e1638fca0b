//! Session harness
//!
//! Builds fully wired sequencers against the in-memory store with a fixed
//! clock, so journey tests stay deterministic regardless of when they run.

use recite_core::{
    CardOrder, Deck, DueDateHistogram, FixedClock, InMemoryStore, QuestionBank, ReviewMode,
    ReviewSequencer, ReviewSettings, Sm2Algorithm, Sm2Settings,
};

use crate::mocks::fixtures;

/// Builder for journey-test review sessions
pub struct SessionBuilder {
    mode: ReviewMode,
    settings: ReviewSettings,
    sm2: Sm2Settings,
    prebuild_histogram: bool,
}

impl SessionBuilder {
    /// Review-mode session: load balancing off for deterministic intervals,
    /// histogram prebuilt from the tree's due cards.
    pub fn review() -> Self {
        Self {
            mode: ReviewMode::Review,
            settings: ReviewSettings::default(),
            sm2: Sm2Settings {
                load_balance: false,
                ..Sm2Settings::default()
            },
            prebuild_histogram: true,
        }
    }

    /// Cram-mode session
    pub fn cram() -> Self {
        Self {
            mode: ReviewMode::Cram,
            ..Self::review()
        }
    }

    /// Toggle sibling burying
    pub fn bury_siblings(mut self, on: bool) -> Self {
        self.settings.bury_sibling_cards = on;
        self
    }

    /// Set the queue order within each deck
    pub fn card_order(mut self, order: CardOrder) -> Self {
        self.settings.card_order = order;
        self
    }

    /// Toggle histogram load balancing in the scheduler
    pub fn load_balance(mut self, on: bool) -> Self {
        self.sm2.load_balance = on;
        self
    }

    /// Wire up a sequencer over `tree` (used as both the original snapshot
    /// and the remaining queue) and advance to the first card.
    pub fn build(
        self,
        bank: QuestionBank,
        tree: Deck,
    ) -> recite_core::Result<ReviewSequencer<InMemoryStore>> {
        let algorithm = Box::new(Sm2Algorithm::new(self.sm2));
        let mut sequencer =
            ReviewSequencer::new(self.mode, self.settings, algorithm, InMemoryStore::new())
                .with_clock(Box::new(FixedClock(fixtures::today())));
        if self.prebuild_histogram {
            sequencer =
                sequencer.with_histogram(DueDateHistogram::from_deck(&tree, fixtures::today()));
        }
        sequencer.set_deck_tree(bank, tree.clone(), tree)?;
        Ok(sequencer)
    }
}
