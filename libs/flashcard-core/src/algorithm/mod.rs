//! Spaced repetition scheduling.

pub mod score_banded;

use crate::error::ScheduleError;
use crate::types::{Band, ScheduleState};
use chrono::NaiveDate;

/// Result of scheduling a card after a graded answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingResult {
    pub new_state: ScheduleState,
    pub band: Band,
}

/// Trait for spaced repetition algorithms driven by a continuous score.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next state after an answer scored `score`.
    ///
    /// Fails if `state` is invalid or the result can't be represented.
    fn schedule(&self, state: &ScheduleState, score: f64)
        -> Result<SchedulingResult, ScheduleError>;

    /// Initial state for a new card.
    fn initial_state(&self, today: NaiveDate) -> ScheduleState;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "score_banded" => Some(Box::new(score_banded::ScoreBanded::default())),
        _ => None,
    }
}

/// Advance `state` with the default algorithm.
pub fn advance(state: &ScheduleState, score: f64) -> Result<ScheduleState, ScheduleError> {
    score_banded::ScoreBanded::default()
        .schedule(state, score)
        .map(|result| result.new_state)
}
