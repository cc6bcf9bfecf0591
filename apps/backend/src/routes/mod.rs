pub mod cards;
pub mod eval;

use axum::Json;

use crate::models::MessageResponse;

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Endpoint hit!"))
}
