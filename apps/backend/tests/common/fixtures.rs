//! Test fixtures and factory functions for creating request bodies.

use serde_json::json;

/// A judge reply in the expected shape.
pub fn judgment(score: f64, reflection: &str) -> String {
    json!({ "score": score, "reflection": reflection }).to_string()
}

/// Create an insert card request body.
pub fn insert_card_request(deck_id: i64, term: &str, definition: &str) -> serde_json::Value {
    json!({ "deck_id": deck_id, "term": term, "definition": definition })
}

/// Create an update card request body.
pub fn update_card_request(card_id: i64, new_term: &str, new_definition: &str) -> serde_json::Value {
    json!({ "card_id": card_id, "new_term": new_term, "new_definition": new_definition })
}

/// Create a delete card request body.
pub fn delete_card_request(card_id: i64) -> serde_json::Value {
    json!({ "card_id": card_id })
}

/// Create an eval card request body for the capital-of-France card.
pub fn eval_card_request(
    ease_factor: f64,
    interval: f64,
    next_review: &str,
) -> serde_json::Value {
    json!({
        "question": "What is the capital of France?",
        "user_answer": "Paris",
        "correct_answer": "Paris",
        "ease_factor": ease_factor,
        "graduated": interval >= 1.0,
        "interval": interval,
        "next_review": next_review
    })
}
