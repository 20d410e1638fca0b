//! # Recite Core
//!
//! Spaced-repetition review sequencer. Drives a review session over a
//! hierarchical deck tree:
//!
//! - **Deck tree**: topic hierarchy with per-deck new and due queues
//! - **Two-tree sessions**: an original snapshot for totals and a remaining
//!   work queue that shrinks as cards are processed
//! - **Pluggable scheduling**: recall responses map to next-due schedules
//!   behind [`SchedulingAlgorithm`]; an SM-2 variant with due-date load
//!   balancing ships as the default
//! - **Due-date histogram**: per-day card counts that algorithms consult to
//!   spread review load across days
//! - **Sibling burying**: reviewing one card of a multi-card question can
//!   postpone its siblings to the next session
//! - **Review and cram modes**: schedule-updating review or
//!   schedule-agnostic drilling
//!
//! Persistence stays outside this crate: the sequencer calls back through
//! [`ReviewStore`] for the three durable writes (schedules, question text,
//! the postponement list) and never touches the filesystem itself.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use recite_core::prelude::*;
//!
//! let settings = ReviewSettings::default();
//! let algorithm = Box::new(Sm2Algorithm::new(Sm2Settings::default()));
//! let mut sequencer =
//!     ReviewSequencer::new(ReviewMode::Review, settings, algorithm, store);
//!
//! sequencer.set_deck_tree(bank, original, remaining)?;
//! while sequencer.has_current_card() {
//!     // show the card, collect the user's response...
//!     sequencer.process_review(ReviewResponse::Good).await?;
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod card;
pub mod deck;
pub mod histogram;
pub mod postpone;
pub mod review;
pub mod scheduler;
pub mod store;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Card and question types
pub use card::{
    Card, CardListType, Note, NoteId, Question, QuestionBank, QuestionId, QuestionKey,
    ReviewResponse, ScheduleInfo, TICKS_PER_DAY,
};

// Deck tree
pub use deck::{CardOrder, Deck, DeckTreeIterator, TopicPath};

// Histogram and postponement
pub use histogram::DueDateHistogram;
pub use postpone::PostponementList;

// Scheduling
pub use scheduler::{NoteEaseList, SchedulingAlgorithm, Sm2Algorithm, Sm2Settings};

// Sequencer
pub use review::{
    DeckStats, Result, ReviewMode, ReviewSequencer, ReviewSettings, SequencerError,
};

// Store and clock
pub use store::{Clock, FixedClock, InMemoryStore, ReviewStore, StoreError, SystemClock};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Card, CardOrder, Deck, DeckStats, DueDateHistogram, PostponementList, QuestionBank,
        Result, ReviewMode, ReviewResponse, ReviewSequencer, ReviewSettings, ReviewStore,
        ScheduleInfo, SchedulingAlgorithm, SequencerError, Sm2Algorithm, Sm2Settings, TopicPath,
    };
}
