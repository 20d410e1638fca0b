//! Card module - Core review types
//!
//! Implements the reviewable-unit data model:
//! - Cards with optional scheduling state (absence = "new")
//! - Questions owning one or more cards plus an editable text payload
//! - Notes grouping questions authored in the same source file
//! - Recall responses and day-offset arithmetic

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Milliseconds per day, used to convert absolute due dates into integer
/// day offsets from "today" for histogram indexing.
pub const TICKS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// ============================================================================
// RECALL RESPONSES
// ============================================================================

/// How the user answered the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewResponse {
    /// Wipe the card's schedule and start over
    Reset,
    /// Recalled with difficulty
    Hard,
    /// Recalled correctly
    Good,
    /// Recalled effortlessly
    Easy,
}

impl ReviewResponse {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewResponse::Reset => "reset",
            ReviewResponse::Hard => "hard",
            ReviewResponse::Good => "good",
            ReviewResponse::Easy => "easy",
        }
    }
}

impl std::fmt::Display for ReviewResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SCHEDULE INFO
// ============================================================================

/// A card's current schedule: when it is due and at what interval.
///
/// Only present on a card that has been reviewed at least once since its
/// last reset; a card without one is "new".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInfo {
    /// Next due date (serialized as unix milliseconds)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub due_date: DateTime<Utc>,
    /// Current inter-review interval in days
    pub interval: u32,
}

impl ScheduleInfo {
    /// Create a schedule from a due date and interval
    pub fn new(due_date: DateTime<Utc>, interval: u32) -> Self {
        Self { due_date, interval }
    }

    /// Schedule due `interval` days after `today`
    pub fn from_interval(today: DateTime<Utc>, interval: u32) -> Self {
        Self {
            due_date: today + Duration::days(i64::from(interval)),
            interval,
        }
    }

    /// Due date as unix milliseconds
    pub fn due_date_as_unix(&self) -> i64 {
        self.due_date.timestamp_millis()
    }

    /// Day offset of the due date relative to `today`, rounded up.
    ///
    /// Overdue cards yield a negative offset; the histogram accepts those
    /// buckets as-is.
    pub fn day_offset(&self, today: DateTime<Utc>) -> i64 {
        let delta = self.due_date.timestamp_millis() - today.timestamp_millis();
        let mut offset = delta.div_euclid(TICKS_PER_DAY);
        if delta.rem_euclid(TICKS_PER_DAY) > 0 {
            offset += 1;
        }
        offset
    }

    /// Whether the due date has arrived
    pub fn is_due(&self, today: DateTime<Utc>) -> bool {
        self.due_date <= today
    }
}

// ============================================================================
// ARENA IDENTIFIERS
// ============================================================================

/// Index of a note within a [`QuestionBank`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(usize);

/// Index of a question within a [`QuestionBank`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(usize);

// ============================================================================
// NOTES AND QUESTIONS
// ============================================================================

/// A source file that questions were authored in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// File path identifying the note
    pub path: PathBuf,
}

/// A question owning one or more cards and an editable text payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The note this question belongs to
    pub note: NoteId,
    /// The editable question text
    pub text: String,
}

/// Durable identity of a question, stable across sessions.
///
/// Questions have no persisted id of their own, so identity is the owning
/// note's path plus an xxh3 digest of the question text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionKey {
    /// Path of the owning note
    pub note_path: PathBuf,
    /// xxh3 digest of the question text
    pub digest: u64,
}

/// Arena of notes and questions for one review session.
///
/// Cards reference questions by [`QuestionId`]; questions reference notes by
/// [`NoteId`]. Both are plain indices, valid for the lifetime of the bank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBank {
    notes: Vec<Note>,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Create an empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a note and return its id
    pub fn add_note(&mut self, path: impl Into<PathBuf>) -> NoteId {
        self.notes.push(Note { path: path.into() });
        NoteId(self.notes.len() - 1)
    }

    /// Register a question under a note and return its id
    pub fn add_question(&mut self, note: NoteId, text: impl Into<String>) -> QuestionId {
        self.questions.push(Question {
            note,
            text: text.into(),
        });
        QuestionId(self.questions.len() - 1)
    }

    /// Look up a note
    pub fn note(&self, id: NoteId) -> &Note {
        &self.notes[id.0]
    }

    /// Look up a question
    pub fn question(&self, id: QuestionId) -> &Question {
        &self.questions[id.0]
    }

    /// Mutable question lookup (for text edits)
    pub fn question_mut(&mut self, id: QuestionId) -> &mut Question {
        &mut self.questions[id.0]
    }

    /// The note owning a question
    pub fn note_of(&self, id: QuestionId) -> &Note {
        self.note(self.question(id).note)
    }

    /// Durable identity of a question
    pub fn question_key(&self, id: QuestionId) -> QuestionKey {
        let question = self.question(id);
        QuestionKey {
            note_path: self.note(question.note).path.clone(),
            digest: xxh3_64(question.text.as_bytes()),
        }
    }

    /// Number of registered questions
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Whether the bank holds no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Path of the note owning a question
    pub fn note_path_of(&self, id: QuestionId) -> &Path {
        &self.note_of(id).path
    }
}

// ============================================================================
// CARDS
// ============================================================================

/// Which logical queue a card sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardListType {
    /// Never reviewed (no schedule)
    New,
    /// Scheduled and due
    Due,
}

impl CardListType {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CardListType::New => "new",
            CardListType::Due => "due",
        }
    }
}

impl std::fmt::Display for CardListType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One reviewable unit derived from a question.
///
/// Identity within a session is `(question, card_index)`. Cards are small
/// clonable values; the original and remaining deck trees hold independent
/// copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// The owning question
    pub question: QuestionId,
    /// Position among the question's sibling cards
    pub card_index: usize,
    /// Scheduling state; `None` means the card is new
    pub schedule: Option<ScheduleInfo>,
}

impl Card {
    /// Create a new (unscheduled) card
    pub fn new(question: QuestionId, card_index: usize) -> Self {
        Self {
            question,
            card_index,
            schedule: None,
        }
    }

    /// Create a scheduled card
    pub fn with_schedule(question: QuestionId, card_index: usize, schedule: ScheduleInfo) -> Self {
        Self {
            question,
            card_index,
            schedule: Some(schedule),
        }
    }

    /// Whether the card has been reviewed since its last reset
    pub fn has_schedule(&self) -> bool {
        self.schedule.is_some()
    }

    /// Which queue the card belongs in
    pub fn list_type(&self) -> CardListType {
        if self.schedule.is_some() {
            CardListType::Due
        } else {
            CardListType::New
        }
    }

    /// Whether two cards are the same unit (same question, same position)
    pub fn same_identity(&self, other: &Card) -> bool {
        self.question == other.question && self.card_index == other.card_index
    }
}

// ============================================================================
// TESTS
// ============================================================================
