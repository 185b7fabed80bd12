use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tenant/store entity owning a catalog of products.
///
/// `tags` is a JSON-encoded string of ambiguous shape at read time: a list of
/// strings, a string-to-string mapping, or an opaque non-JSON string. Readers
/// must tolerate all three without failing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shop {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
