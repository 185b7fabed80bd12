use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One chat turn: a user-authored message plus an optional assistant response.
/// Chronological order is given by `created_at` (and by position when loaded
/// as a history slice).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
}
