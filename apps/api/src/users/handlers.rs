use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

/// GET /api/v1/users
pub async fn handle_list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = sqlx::query_as("SELECT * FROM users ORDER BY created_at")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(users))
}

/// POST /api/v1/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>, AppError> {
    if req.username.trim().is_empty() || req.email.trim().is_empty() {
        return Err(AppError::Validation(
            "Username and email must not be empty".into(),
        ));
    }

    let existing: Option<User> =
        sqlx::query_as("SELECT * FROM users WHERE username = $1 OR email = $2")
            .bind(&req.username)
            .bind(&req.email)
            .fetch_optional(&state.db)
            .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Username or email already registered".into(),
        ));
    }

    let user: User = sqlx::query_as("INSERT INTO users (username, email) VALUES ($1, $2) RETURNING *")
        .bind(&req.username)
        .bind(&req.email)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(user))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?;
    let user = user.ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(Json(user))
}
