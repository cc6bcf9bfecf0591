//! Score-banded scheduler.
//!
//! A continuous correctness score is bucketed into one of four bands, and
//! each band adjusts the ease factor and interval with a fixed rule. The
//! ease floor and ceiling gate whether a step is applied; they never clamp.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::error::ScheduleError;
use crate::types::{Band, ScheduleState};
use chrono::{Datelike, Days, NaiveDate};

/// Last year a review date may fall in, so it always prints as `YYYY-MM-DD`.
pub const MAX_REVIEW_YEAR: i32 = 9999;

/// Score-banded algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct ScoreBanded {
    pub ease_step_up: f64,
    pub ease_step_down: f64,
    /// Easy only raises the ease factor while it is below this.
    pub ease_ceiling: f64,
    /// Hard/Again only lower the ease factor while it is above this.
    pub ease_floor: f64,
    /// First step of the learning phase (Good on a fresh card).
    pub learning_interval: f64,
    pub graduating_interval: f64,
}

impl Default for ScoreBanded {
    fn default() -> Self {
        Self {
            ease_step_up: 0.15,
            ease_step_down: 0.2,
            ease_ceiling: 4.0,
            ease_floor: 1.3,
            learning_interval: 0.5,
            graduating_interval: 1.0,
        }
    }
}

impl SpacedRepetitionAlgorithm for ScoreBanded {
    fn name(&self) -> &'static str {
        "score_banded"
    }

    fn initial_state(&self, today: NaiveDate) -> ScheduleState {
        ScheduleState::new_card(today)
    }

    fn schedule(
        &self,
        state: &ScheduleState,
        score: f64,
    ) -> Result<SchedulingResult, ScheduleError> {
        state.check()?;

        let band = Band::from_score(score);
        let mut ease = state.ease_factor;
        let mut interval = state.interval;

        match band {
            Band::Easy => {
                if ease < self.ease_ceiling {
                    ease += self.ease_step_up;
                }
                interval = if self.is_learning(interval) {
                    self.graduating_interval
                } else {
                    interval * ease
                };
            }
            Band::Good => {
                interval = if interval == 0.0 {
                    self.learning_interval
                } else if interval == self.learning_interval {
                    self.graduating_interval
                } else {
                    interval * ease
                };
            }
            Band::Hard => {
                ease = self.step_down(ease);
                interval *= ease;
            }
            Band::Again => {
                ease = self.step_down(ease);
                interval = 0.0;
            }
        }

        let new_state = ScheduleState {
            ease_factor: ease,
            interval,
            graduated: interval >= 1.0,
            next_review: add_interval(state.next_review, interval)?,
        };
        new_state.check()?;

        Ok(SchedulingResult { new_state, band })
    }
}

impl ScoreBanded {
    fn is_learning(&self, interval: f64) -> bool {
        interval == 0.0 || interval == self.learning_interval
    }

    fn step_down(&self, ease: f64) -> f64 {
        if ease > self.ease_floor {
            ease - self.ease_step_down
        } else {
            ease
        }
    }
}

/// Add `interval` days to `from`, dropping the fractional part.
fn add_interval(from: NaiveDate, interval: f64) -> Result<NaiveDate, ScheduleError> {
    if !interval.is_finite() {
        return Err(ScheduleError::DateOutOfRange);
    }
    from.checked_add_days(Days::new(interval.trunc() as u64))
        .filter(|date| date.year() <= MAX_REVIEW_YEAR)
        .ok_or(ScheduleError::DateOutOfRange)
}
