use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::embedding::EmbeddingClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable embedding backend. Default: GeminiEmbedder. Substituted in tests.
    pub embedder: Arc<dyn EmbeddingClient>,
    #[allow(dead_code)]
    pub config: Config,
}
