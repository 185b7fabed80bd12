use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::product::Product;
use crate::models::shop::Shop;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateShopRequest {
    pub name: String,
    pub description: Option<String>,
    /// JSON-encoded string; stored opaquely and parsed only at prompt time.
    pub tags: Option<String>,
}

#[derive(Serialize)]
pub struct ShopWithProductsResponse {
    #[serde(flatten)]
    pub shop: Shop,
    pub products: Vec<Product>,
}

/// GET /api/v1/shops
pub async fn handle_list_shops(
    State(state): State<AppState>,
) -> Result<Json<Vec<Shop>>, AppError> {
    let shops = sqlx::query_as("SELECT * FROM shops ORDER BY created_at")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(shops))
}

/// POST /api/v1/shops
pub async fn handle_create_shop(
    State(state): State<AppState>,
    Json(req): Json<CreateShopRequest>,
) -> Result<Json<Shop>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Shop name must not be empty".into()));
    }

    let existing: Option<Shop> = sqlx::query_as("SELECT * FROM shops WHERE name = $1")
        .bind(&req.name)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Shop with this name already exists".into(),
        ));
    }

    let shop: Shop = sqlx::query_as(
        "INSERT INTO shops (name, description, tags) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.tags)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(shop))
}

/// GET /api/v1/shops/:id
pub async fn handle_get_shop(
    State(state): State<AppState>,
    Path(shop_id): Path<Uuid>,
) -> Result<Json<ShopWithProductsResponse>, AppError> {
    let shop: Option<Shop> = sqlx::query_as("SELECT * FROM shops WHERE id = $1")
        .bind(shop_id)
        .fetch_optional(&state.db)
        .await?;
    let shop = shop.ok_or_else(|| AppError::NotFound(format!("Shop {shop_id} not found")))?;

    let products: Vec<Product> =
        sqlx::query_as("SELECT * FROM products WHERE shop_id = $1 ORDER BY name")
            .bind(shop_id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(ShopWithProductsResponse { shop, products }))
}

/// PUT /api/v1/shops/:id
pub async fn handle_update_shop(
    State(state): State<AppState>,
    Path(shop_id): Path<Uuid>,
    Json(req): Json<CreateShopRequest>,
) -> Result<Json<Shop>, AppError> {
    let existing: Option<Shop> = sqlx::query_as("SELECT * FROM shops WHERE id = $1")
        .bind(shop_id)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_none() {
        return Err(AppError::NotFound(format!("Shop {shop_id} not found")));
    }

    // Reject renames that collide with another shop
    let conflict: Option<Shop> = sqlx::query_as("SELECT * FROM shops WHERE name = $1 AND id != $2")
        .bind(&req.name)
        .bind(shop_id)
        .fetch_optional(&state.db)
        .await?;
    if conflict.is_some() {
        return Err(AppError::Conflict(
            "Shop with this name already exists".into(),
        ));
    }

    let shop: Shop = sqlx::query_as(
        "UPDATE shops SET name = $1, description = $2, tags = $3, updated_at = now() \
         WHERE id = $4 RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.tags)
    .bind(shop_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(shop))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// DELETE /api/v1/shops/:id
pub async fn handle_delete_shop(
    State(state): State<AppState>,
    Path(shop_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let result = sqlx::query("DELETE FROM shops WHERE id = $1")
        .bind(shop_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Shop {shop_id} not found")));
    }

    Ok(Json(DeleteResponse {
        message: "Shop deleted successfully".to_string(),
    }))
}
