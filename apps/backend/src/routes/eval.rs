//! Answer evaluation endpoint

use axum::{extract::State, Json};

use crate::error::{Result, ValidJson};
use crate::models::*;
use crate::AppState;

/// POST /eval-card
/// Grades the answer, then advances the card's schedule by the score.
/// Persisting the returned state is left to the caller.
pub async fn evaluate(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<EvalCardRequest>,
) -> Result<Json<EvalCardResponse>> {
    let current = payload.schedule_state();
    current.check()?;

    let grade = state
        .grader
        .grade(&payload.question, &payload.user_answer, &payload.correct_answer)
        .await;

    let result = state.algorithm.schedule(&current, grade.score)?;

    tracing::info!(
        score = grade.score,
        band = %result.band,
        interval = result.new_state.interval,
        next_review = %result.new_state.next_review,
        "Evaluated answer"
    );

    Ok(Json(EvalCardResponse::new(grade, result.new_state)))
}
