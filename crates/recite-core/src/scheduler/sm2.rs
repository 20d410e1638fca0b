//! SM-2 variant with due-date load balancing
//!
//! The shipped default algorithm. Intervals grow multiplicatively with ease
//! on success and shrink on a hard recall; new cards seed from the owning
//! note's ease so cards authored in a note the user finds hard start short.
//! When load balancing is on, the due date lands on the least-loaded
//! histogram bucket within a fuzz window around the computed interval.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::{ReviewResponse, ScheduleInfo};
use crate::histogram::DueDateHistogram;
use crate::scheduler::SchedulingAlgorithm;

// ============================================================================
// SETTINGS
// ============================================================================

/// Tuning knobs for [`Sm2Algorithm`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sm2Settings {
    /// Interval multiplier for a Good response
    pub base_ease: f64,
    /// Extra multiplier on top of ease for an Easy response
    pub easy_bonus: f64,
    /// Interval multiplier for a Hard response (< 1)
    pub lapse_interval_factor: f64,
    /// Hard ceiling on intervals, in days
    pub max_interval_days: u32,
    /// Whether to spread due dates via the histogram
    pub load_balance: bool,
}

impl Default for Sm2Settings {
    fn default() -> Self {
        Self {
            base_ease: 2.5,
            easy_bonus: 1.3,
            lapse_interval_factor: 0.5,
            max_interval_days: 36500,
            load_balance: true,
        }
    }
}

// ============================================================================
// NOTE EASE
// ============================================================================

/// Per-note ease table, seeded at session start by whatever built the deck
/// trees. Notes the user has historically found hard carry a lower ease, so
/// their new cards start with shorter intervals.
#[derive(Debug, Clone, Default)]
pub struct NoteEaseList {
    eases: HashMap<PathBuf, f64>,
}

impl NoteEaseList {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a note's ease
    pub fn set(&mut self, path: impl Into<PathBuf>, ease: f64) {
        self.eases.insert(path.into(), ease);
    }

    /// Ease for a note, if recorded
    pub fn get(&self, path: &Path) -> Option<f64> {
        self.eases.get(path).copied()
    }
}

// ============================================================================
// ALGORITHM
// ============================================================================

/// SM-2-style scheduler with histogram load balancing
#[derive(Debug, Clone, Default)]
pub struct Sm2Algorithm {
    settings: Sm2Settings,
    note_eases: NoteEaseList,
}

impl Sm2Algorithm {
    /// Create with settings and an empty note-ease table
    pub fn new(settings: Sm2Settings) -> Self {
        Self {
            settings,
            note_eases: NoteEaseList::new(),
        }
    }

    /// Attach a per-note ease table
    pub fn with_note_eases(mut self, note_eases: NoteEaseList) -> Self {
        self.note_eases = note_eases;
        self
    }

    fn clamp_interval(&self, raw: f64) -> u32 {
        let rounded = raw.round().max(1.0) as u32;
        rounded.min(self.settings.max_interval_days)
    }

    /// Fuzz window half-width for an interval: short intervals wiggle a
    /// day, longer ones a few percent.
    fn fuzz(interval: u32) -> u32 {
        if interval < 7 {
            1
        } else if interval < 30 {
            (interval * 15 / 100).max(2)
        } else {
            (interval * 5 / 100).max(4)
        }
    }

    fn balanced_interval(&self, interval: u32, histogram: &DueDateHistogram) -> u32 {
        if !self.settings.load_balance || interval < 2 {
            return interval;
        }
        let fuzz = Self::fuzz(interval);
        let lo = interval.saturating_sub(fuzz).max(1);
        let hi = (interval + fuzz).min(self.settings.max_interval_days);
        histogram.least_loaded_offset(i64::from(lo), i64::from(hi)) as u32
    }

    fn schedule(
        &self,
        interval: u32,
        histogram: &DueDateHistogram,
        today: DateTime<Utc>,
    ) -> ScheduleInfo {
        let interval = self.balanced_interval(interval, histogram);
        ScheduleInfo::from_interval(today, interval)
    }
}

impl SchedulingAlgorithm for Sm2Algorithm {
    fn reset_schedule(&self, today: DateTime<Utc>) -> ScheduleInfo {
        ScheduleInfo::from_interval(today, 1)
    }

    fn updated_schedule(
        &self,
        response: ReviewResponse,
        old: &ScheduleInfo,
        histogram: &DueDateHistogram,
        today: DateTime<Utc>,
    ) -> ScheduleInfo {
        let s = &self.settings;
        let old_interval = f64::from(old.interval);
        let raw = match response {
            ReviewResponse::Hard => (old_interval * s.lapse_interval_factor).max(1.0),
            ReviewResponse::Good => old_interval * s.base_ease,
            ReviewResponse::Easy => old_interval * s.base_ease * s.easy_bonus,
            // Reset is dispatched to reset_schedule by the sequencer
            ReviewResponse::Reset => 1.0,
        };
        self.schedule(self.clamp_interval(raw), histogram, today)
    }

    fn newcard_schedule(
        &self,
        response: ReviewResponse,
        note_path: &Path,
        histogram: &DueDateHistogram,
        today: DateTime<Utc>,
    ) -> ScheduleInfo {
        let s = &self.settings;
        let base = match response {
            ReviewResponse::Hard | ReviewResponse::Reset => 1.0,
            ReviewResponse::Good => 3.0,
            ReviewResponse::Easy => 4.0,
        };
        // Scale by the note's ease relative to the configured base
        let ease = self.note_eases.get(note_path).unwrap_or(s.base_ease);
        let raw = base * (ease / s.base_ease);
        self.schedule(self.clamp_interval(raw), histogram, today)
    }
}

// ============================================================================
// TESTS
// ============================================================================
