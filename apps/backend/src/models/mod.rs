//! Database models and API types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Re-export shared types from flashcard-core
pub use flashcard_core::types::{Band, GradeResult, ScheduleState};

// === Database Entity Types ===

/// Card stored in PostgreSQL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CardRow {
    pub card_id: i64,
    pub deck_id: i64,
    pub term: String,
    pub definition: String,
    pub ease_factor: f64,
    pub interval: f64,
    pub graduated: bool,
    pub next_review: NaiveDate,
}

impl CardRow {
    /// Scheduling fields of this card
    pub fn schedule_state(&self) -> ScheduleState {
        ScheduleState {
            ease_factor: self.ease_factor,
            interval: self.interval,
            graduated: self.graduated,
            next_review: self.next_review,
        }
    }
}

/// Row to insert for a new card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCardRow {
    pub deck_id: i64,
    pub term: String,
    pub definition: String,
    pub ease_factor: f64,
    pub interval: f64,
    pub graduated: bool,
    pub next_review: NaiveDate,
}

impl NewCardRow {
    /// Row carrying a new card's initial schedule
    pub fn new(deck_id: i64, term: String, definition: String, state: ScheduleState) -> Self {
        Self {
            deck_id,
            term,
            definition,
            ease_factor: state.ease_factor,
            interval: state.interval,
            graduated: state.graduated,
            next_review: state.next_review,
        }
    }
}

// === API Request Types ===

/// POST /insert-card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertCardRequest {
    pub deck_id: i64,
    pub term: String,
    pub definition: String,
}

/// POST /insert-cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertCardsRequest {
    pub cards: Vec<InsertCardRequest>,
}

/// POST /update-card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    pub card_id: i64,
    pub new_term: String,
    pub new_definition: String,
}

/// POST /delete-card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCardRequest {
    pub card_id: i64,
}

/// POST /eval-card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCardRequest {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub ease_factor: f64,
    /// Accepted for compatibility; recomputed from the interval.
    pub graduated: bool,
    pub interval: f64,
    pub next_review: NaiveDate,
}

impl EvalCardRequest {
    pub fn schedule_state(&self) -> ScheduleState {
        ScheduleState {
            ease_factor: self.ease_factor,
            interval: self.interval,
            graduated: self.graduated,
            next_review: self.next_review,
        }
    }
}

// === API Response Types ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertCardsResponse {
    pub message: String,
    pub inserted: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalCardResponse {
    pub reflection: String,
    pub ease_factor: f64,
    pub graduated: bool,
    pub interval: f64,
    pub next_review: NaiveDate,
    pub score: f64,
}

impl EvalCardResponse {
    pub fn new(grade: GradeResult, state: ScheduleState) -> Self {
        Self {
            reflection: grade.reflection,
            ease_factor: state.ease_factor,
            graduated: state.graduated,
            interval: state.interval,
            next_review: state.next_review,
            score: grade.score,
        }
    }
}
