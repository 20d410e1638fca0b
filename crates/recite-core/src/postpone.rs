//! Postponement list - sibling suppression
//!
//! When sibling burying is enabled, reviewing one card of a multi-card
//! question postpones its siblings: the question's durable identity goes on
//! this list, and whatever builds the next session's deck trees skips the
//! listed questions. The list is appended to during review and written
//! durably at that moment, not batched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::card::QuestionKey;

/// Set of question identities to suppress, created fresh or loaded at
/// session start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostponementList {
    keys: HashSet<QuestionKey>,
}

impl PostponementList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from previously persisted keys
    pub fn from_keys(keys: impl IntoIterator<Item = QuestionKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Add a question's identity; returns false if it was already listed
    pub fn add(&mut self, key: QuestionKey) -> bool {
        self.keys.insert(key)
    }

    /// Whether a question is suppressed
    pub fn contains(&self, key: &QuestionKey) -> bool {
        self.keys.contains(key)
    }

    /// Number of suppressed questions
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is suppressed
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate the suppressed identities (arbitrary order)
    pub fn iter(&self) -> impl Iterator<Item = &QuestionKey> {
        self.keys.iter()
    }

    /// Drop all entries (start of a fresh pass)
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

// ============================================================================
// TESTS
// ============================================================================
