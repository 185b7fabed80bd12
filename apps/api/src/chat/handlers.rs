use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct CreateChatMessageRequest {
    pub user_id: Uuid,
    pub message: String,
}

/// GET /api/v1/chat?user_id=...
pub async fn handle_list_messages(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let messages =
        sqlx::query_as("SELECT * FROM chat_messages WHERE user_id = $1 ORDER BY created_at")
            .bind(params.user_id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(messages))
}

/// POST /api/v1/chat
///
/// Stores the message with a placeholder echo response. The real response
/// comes from the external generation service, which consumes the prompts
/// built by the chatbot module.
pub async fn handle_create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateChatMessageRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("Message must not be empty".into()));
    }

    let user_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1")
        .bind(req.user_id)
        .fetch_optional(&state.db)
        .await?;
    if user_exists.is_none() {
        return Err(AppError::NotFound(format!(
            "User {} not found",
            req.user_id
        )));
    }

    let response = format!("Echo: {}", req.message);

    let message: ChatMessage = sqlx::query_as(
        "INSERT INTO chat_messages (user_id, message, response) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(req.user_id)
    .bind(&req.message)
    .bind(&response)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(message))
}
