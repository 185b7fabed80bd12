use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::product::Product;
use crate::products::search::rank_by_similarity;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProductListQuery {
    pub shop_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub shop_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    10
}

#[derive(Serialize)]
pub struct ProductSearchResponse {
    pub name: String,
    pub price: f64,
    pub description: String,
}

/// GET /api/v1/products
pub async fn handle_list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = match params.shop_id {
        Some(shop_id) => {
            sqlx::query_as("SELECT * FROM products WHERE shop_id = $1 ORDER BY name")
                .bind(shop_id)
                .fetch_all(&state.db)
                .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM products ORDER BY name")
                .fetch_all(&state.db)
                .await?
        }
    };
    Ok(Json(products))
}

/// POST /api/v1/products
///
/// Embeds `name + " " + description` through the injected client before
/// insert, so the product is searchable immediately.
pub async fn handle_create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<Product>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Product name must not be empty".into()));
    }
    if req.price < 0.0 || !req.price.is_finite() {
        return Err(AppError::Validation(
            "Product price must be a non-negative number".into(),
        ));
    }

    let shop_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM shops WHERE id = $1")
        .bind(req.shop_id)
        .fetch_optional(&state.db)
        .await?;
    if shop_exists.is_none() {
        return Err(AppError::NotFound(format!(
            "Shop {} not found",
            req.shop_id
        )));
    }

    let embedding = state
        .embedder
        .embed(&format!("{} {}", req.name, req.description))
        .await?;

    let product: Product = sqlx::query_as(
        "INSERT INTO products (shop_id, name, description, price, embedding) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(req.shop_id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(&embedding)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(product))
}

/// GET /api/v1/products/search?q=...&limit=...
pub async fn handle_search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<ProductSearchResponse>>, AppError> {
    if params.q.trim().is_empty() {
        return Err(AppError::Validation("Search query must not be empty".into()));
    }

    let query_embedding = state.embedder.embed(&params.q).await?;

    let products: Vec<Product> = sqlx::query_as("SELECT * FROM products")
        .fetch_all(&state.db)
        .await?;

    let ranked = rank_by_similarity(products, &query_embedding, params.limit);

    Ok(Json(
        ranked
            .into_iter()
            .map(|p| ProductSearchResponse {
                name: p.name,
                price: p.price,
                description: p.description,
            })
            .collect(),
    ))
}
