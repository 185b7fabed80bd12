//! Prompt-construction endpoints.
//!
//! These load the rows a builder needs, call the pure builder, and return
//! the assembled prompt. The generation call itself happens elsewhere (an
//! external service owns it); these endpoints only produce its input.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chatbot::{
    build_comparison_prompt, build_generic_prompt, build_shop_prompt, build_support_prompt,
};
use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::models::product::Product;
use crate::models::shop::Shop;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ShopPromptRequest {
    /// When present, this user's chat history is included in the prompt.
    pub user_id: Option<Uuid>,
    pub current_message: Option<String>,
}

#[derive(Deserialize)]
pub struct ComparisonPromptRequest {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct GenericPromptRequest {
    pub user_id: Option<Uuid>,
    pub current_message: Option<String>,
    pub context: Option<String>,
}

#[derive(Deserialize)]
pub struct SupportPromptRequest {
    pub user_id: Option<Uuid>,
    pub current_message: Option<String>,
    pub support_context: Option<String>,
}

#[derive(Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

/// POST /api/v1/shops/:id/prompt
pub async fn handle_shop_prompt(
    State(state): State<AppState>,
    Path(shop_id): Path<Uuid>,
    Json(req): Json<ShopPromptRequest>,
) -> Result<Json<PromptResponse>, AppError> {
    let shop = load_shop(&state, shop_id).await?;
    let products = load_products(&state, shop_id).await?;
    let history = match req.user_id {
        Some(user_id) => load_history(&state, user_id).await?,
        None => Vec::new(),
    };

    let prompt = build_shop_prompt(&shop, &products, &history, req.current_message.as_deref());
    Ok(Json(PromptResponse { prompt }))
}

/// POST /api/v1/shops/:id/prompt/comparison
pub async fn handle_comparison_prompt(
    State(state): State<AppState>,
    Path(shop_id): Path<Uuid>,
    Json(req): Json<ComparisonPromptRequest>,
) -> Result<Json<PromptResponse>, AppError> {
    let shop = load_shop(&state, shop_id).await?;
    let products = load_products(&state, shop_id).await?;

    let prompt = build_comparison_prompt(&shop, &products, req.category.as_deref());
    Ok(Json(PromptResponse { prompt }))
}

/// POST /api/v1/chat/prompt
pub async fn handle_generic_prompt(
    State(state): State<AppState>,
    Json(req): Json<GenericPromptRequest>,
) -> Result<Json<PromptResponse>, AppError> {
    let history = match req.user_id {
        Some(user_id) => load_history(&state, user_id).await?,
        None => Vec::new(),
    };

    let prompt = build_generic_prompt(
        &history,
        req.current_message.as_deref(),
        req.context.as_deref(),
    );
    Ok(Json(PromptResponse { prompt }))
}

/// POST /api/v1/chat/prompt/support
pub async fn handle_support_prompt(
    State(state): State<AppState>,
    Json(req): Json<SupportPromptRequest>,
) -> Result<Json<PromptResponse>, AppError> {
    let history = match req.user_id {
        Some(user_id) => load_history(&state, user_id).await?,
        None => Vec::new(),
    };

    let prompt = build_support_prompt(
        &history,
        req.current_message.as_deref(),
        req.support_context.as_deref(),
    );
    Ok(Json(PromptResponse { prompt }))
}

async fn load_shop(state: &AppState, shop_id: Uuid) -> Result<Shop, AppError> {
    let shop: Option<Shop> = sqlx::query_as("SELECT * FROM shops WHERE id = $1")
        .bind(shop_id)
        .fetch_optional(&state.db)
        .await?;
    shop.ok_or_else(|| AppError::NotFound(format!("Shop {shop_id} not found")))
}

async fn load_products(state: &AppState, shop_id: Uuid) -> Result<Vec<Product>, AppError> {
    let products = sqlx::query_as("SELECT * FROM products WHERE shop_id = $1 ORDER BY name")
        .bind(shop_id)
        .fetch_all(&state.db)
        .await?;
    Ok(products)
}

/// Loads a user's full chat history in chronological order.
/// Builders apply their own window (last 5 or last 10 turns).
async fn load_history(state: &AppState, user_id: Uuid) -> Result<Vec<ChatMessage>, AppError> {
    let history =
        sqlx::query_as("SELECT * FROM chat_messages WHERE user_id = $1 ORDER BY created_at")
            .bind(user_id)
            .fetch_all(&state.db)
            .await?;
    Ok(history)
}
