//! Core types for the flashcard study service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Ease factor assigned to a freshly inserted card.
pub const INITIAL_EASE: f64 = 1.0;

/// Score band a graded answer falls into.
///
/// Bands are open on the left and closed on the right, except `Again`
/// which also includes 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Again,
    Hard,
    Good,
    Easy,
}

impl Band {
    /// Bucket a correctness score.
    ///
    /// Total over every `f64`: anything above 1.0 counts as `Easy`,
    /// anything below 0.0 (and NaN) counts as `Again`.
    pub fn from_score(score: f64) -> Self {
        if score > 0.75 {
            Self::Easy
        } else if score > 0.5 {
            Self::Good
        } else if score > 0.25 {
            Self::Hard
        } else {
            Self::Again
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-card scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
    pub ease_factor: f64,
    /// Days until the next review. 0 means due immediately.
    pub interval: f64,
    /// Derived: `interval >= 1`.
    pub graduated: bool,
    pub next_review: NaiveDate,
}

impl ScheduleState {
    /// State given to a card at insertion time.
    pub fn new_card(today: NaiveDate) -> Self {
        Self {
            ease_factor: INITIAL_EASE,
            interval: 0.0,
            graduated: false,
            next_review: today,
        }
    }

    /// Reject ease factors and intervals that can't be scheduled.
    pub fn check(&self) -> Result<(), ScheduleError> {
        for (field, value) in [("ease_factor", self.ease_factor), ("interval", self.interval)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScheduleError::InvalidState { field, value });
            }
        }
        Ok(())
    }
}

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    /// Continuous correctness in [0.0, 1.0]; higher is better.
    pub score: f64,
    pub reflection: String,
}

impl GradeResult {
    /// Worst-case result used when the judge's answer can't be used.
    pub fn fallback(reason: impl std::fmt::Display) -> Self {
        Self {
            score: 0.0,
            reflection: format!("Error grading answer: {}", reason),
        }
    }
}
