use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog item belonging to a shop.
///
/// `embedding` is populated at create time from the injected embedding client
/// and never leaves the server (it is skipped during serialization).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing, default)]
    pub embedding: Option<Vec<f32>>,
}
