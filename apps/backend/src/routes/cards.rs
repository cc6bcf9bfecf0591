//! Card endpoints

use axum::{extract::State, Json};
use chrono::Local;

use crate::error::{ApiError, Result, ValidJson};
use crate::models::*;
use crate::AppState;

/// POST /insert-card
pub async fn insert(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<InsertCardRequest>,
) -> Result<Json<MessageResponse>> {
    let initial = state.algorithm.initial_state(Local::now().date_naive());
    let row = NewCardRow::new(payload.deck_id, payload.term, payload.definition, initial);

    if state.store.insert_card(&row).await? == 0 {
        return Err(ApiError::Persistence("Failed to insert card".to_string()));
    }

    tracing::info!(deck_id = row.deck_id, "Inserted card");

    Ok(Json(MessageResponse::new("Successfully inserted card!")))
}

/// POST /insert-cards
/// Inserts every card or none
pub async fn insert_many(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<InsertCardsRequest>,
) -> Result<Json<InsertCardsResponse>> {
    if payload.cards.is_empty() {
        return Err(ApiError::Validation("cards: must not be empty".to_string()));
    }

    let initial = state.algorithm.initial_state(Local::now().date_naive());
    let rows: Vec<NewCardRow> = payload
        .cards
        .into_iter()
        .map(|c| NewCardRow::new(c.deck_id, c.term, c.definition, initial.clone()))
        .collect();

    let inserted = state.store.insert_cards(&rows).await?;
    if inserted != rows.len() as u64 {
        return Err(ApiError::Persistence(format!(
            "Inserted {} of {} cards",
            inserted,
            rows.len()
        )));
    }

    tracing::info!(count = inserted, "Inserted cards");

    Ok(Json(InsertCardsResponse {
        message: "Successfully inserted cards!".to_string(),
        inserted,
    }))
}

/// POST /update-card
pub async fn update(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<UpdateCardRequest>,
) -> Result<Json<MessageResponse>> {
    let updated = state
        .store
        .update_card(payload.card_id, &payload.new_term, &payload.new_definition)
        .await?;

    if updated == 0 {
        return Err(ApiError::Persistence(format!(
            "Failed to update card {}",
            payload.card_id
        )));
    }

    tracing::info!(card_id = payload.card_id, "Updated card");

    Ok(Json(MessageResponse::new("Successfully updated card!")))
}

/// POST /delete-card
pub async fn delete(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<DeleteCardRequest>,
) -> Result<Json<MessageResponse>> {
    if state.store.delete_card(payload.card_id).await? == 0 {
        return Err(ApiError::Persistence(format!(
            "Failed to delete card {}",
            payload.card_id
        )));
    }

    tracing::info!(card_id = payload.card_id, "Deleted card");

    Ok(Json(MessageResponse::new("Successfully deleted card!")))
}
