//! External collaborator contracts
//!
//! The sequencer suspends only at three durable writes: a question's
//! updated schedule, a question's edited text, and the postponement list.
//! All three go through [`ReviewStore`]; real persistence (note files, a
//! database) lives outside this crate. [`Clock`] supplies "today" for
//! day-offset arithmetic.

use chrono::{DateTime, NaiveTime, Utc};

use crate::card::{Card, Question};
use crate::postpone::PostponementList;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Persistence error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Write rejected by the backing store
    #[error("Write failed: {0}")]
    Write(String),
}

// ============================================================================
// STORE CONTRACT
// ============================================================================

/// Durable write collaborator.
///
/// The sequencer mutates its in-memory state synchronously *before*
/// awaiting these writes and does not roll back on failure; a failed write
/// means "card state uncertain, re-derive from the persisted source".
#[allow(async_fn_in_trait)]
pub trait ReviewStore {
    /// Persist a question's cards with their current schedules
    async fn write_question_schedule(
        &mut self,
        question: &Question,
        cards: &[Card],
    ) -> Result<(), StoreError>;

    /// Persist a question's edited text
    async fn write_question_text(&mut self, question: &Question) -> Result<(), StoreError>;

    /// Persist the postponement list
    async fn write_postponement_list(
        &mut self,
        list: &PostponementList,
    ) -> Result<(), StoreError>;
}

// ============================================================================
// CLOCK
// ============================================================================

/// Provider of "today" for day-offset arithmetic.
///
/// The sequencer samples it once per review action, so a single action
/// never straddles a date change.
pub trait Clock {
    /// Today at midnight UTC
    fn today(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateTime<Utc> {
        Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
    }
}

/// Fixed-date clock for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn today(&self) -> DateTime<Utc> {
        self.0
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Store that records every write in memory.
///
/// Ships for tests and for embedding callers that persist elsewhere; can
/// inject failures to exercise the no-rollback error path.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Every schedule write, in order
    pub schedule_writes: Vec<(Question, Vec<Card>)>,
    /// Every text write, in order
    pub text_writes: Vec<Question>,
    /// Snapshot of the postponement list at each write
    pub postponement_writes: Vec<PostponementList>,
    /// When true, every write fails
    pub fail_writes: bool,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write("injected failure".to_string()));
        }
        Ok(())
    }
}

impl ReviewStore for InMemoryStore {
    async fn write_question_schedule(
        &mut self,
        question: &Question,
        cards: &[Card],
    ) -> Result<(), StoreError> {
        self.check()?;
        self.schedule_writes.push((question.clone(), cards.to_vec()));
        Ok(())
    }

    async fn write_question_text(&mut self, question: &Question) -> Result<(), StoreError> {
        self.check()?;
        self.text_writes.push(question.clone());
        Ok(())
    }

    async fn write_postponement_list(
        &mut self,
        list: &PostponementList,
    ) -> Result<(), StoreError> {
        self.check()?;
        self.postponement_writes.push(list.clone());
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
