//! Core flashcard library used by the backend service.
//!
//! Provides:
//! - Score-banded spaced repetition scheduling
//! - Prompt construction and response parsing for the answer judge
//! - Shared types (ScheduleState, Band, GradeResult)

pub mod algorithm;
pub mod error;
pub mod grading;
pub mod types;

pub use algorithm::{advance, get_algorithm, SchedulingResult, SpacedRepetitionAlgorithm};
pub use error::{GradeError, Result, ScheduleError};
pub use grading::{build_conversation, parse_judgment, JudgeMessage, Role, DEFAULT_RUBRIC};
pub use types::{Band, GradeResult, ScheduleState};
