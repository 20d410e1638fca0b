//! Scheduling algorithms
//!
//! A scheduling algorithm maps a recall response plus prior schedule (or
//! none, for a new card) into the next [`ScheduleInfo`]. Algorithm variants
//! are interchangeable behind the trait; the due-date histogram is passed by
//! reference so an algorithm can load-balance due dates across days.

mod sm2;

pub use sm2::{NoteEaseList, Sm2Algorithm, Sm2Settings};

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::card::{ReviewResponse, ScheduleInfo};
use crate::histogram::DueDateHistogram;

/// Pure function set producing next-due schedules from recall quality.
///
/// `today` is sampled once per review action by the sequencer so all three
/// operations see a stable date.
pub trait SchedulingAlgorithm {
    /// Schedule for a card whose history is wiped (independent of prior
    /// state)
    fn reset_schedule(&self, today: DateTime<Utc>) -> ScheduleInfo;

    /// Updated schedule for a card reviewed before
    fn updated_schedule(
        &self,
        response: ReviewResponse,
        old: &ScheduleInfo,
        histogram: &DueDateHistogram,
        today: DateTime<Utc>,
    ) -> ScheduleInfo;

    /// First schedule for a new card. The owning note's path lets the
    /// algorithm seed from per-note state (e.g. average ease).
    fn newcard_schedule(
        &self,
        response: ReviewResponse,
        note_path: &Path,
        histogram: &DueDateHistogram,
        today: DateTime<Utc>,
    ) -> ScheduleInfo;
}
