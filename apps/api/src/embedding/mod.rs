/// Embedding client — the single point of entry for all embedding calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Handlers receive the client through `AppState` as `Arc<dyn EmbeddingClient>`,
/// so tests can substitute a canned backend without touching the network.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all embedding calls.
/// Intentionally hardcoded to prevent accidental drift: stored vectors are
/// only comparable to query vectors from the same model.
pub const EMBEDDING_MODEL: &str = "gemini-embedding-001";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Embedding response contained no values")]
    EmptyEmbedding,
}

/// Pluggable embedding backend.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embeds a single text into a vector of floats.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    content: Content<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

/// Gemini-backed embedding client.
/// Wraps the `embedContent` REST endpoint with retry logic.
#[derive(Clone)]
pub struct GeminiEmbedder {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiEmbedder {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{GEMINI_API_BASE}/{EMBEDDING_MODEL}:embedContent")
    }
}

#[async_trait]
impl EmbeddingClient for GeminiEmbedder {
    /// Makes a call to the Gemini embedContent API.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request_body = EmbedContentRequest {
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(self.endpoint())
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let embed_response: EmbedContentResponse = response.json().await?;

            if embed_response.embedding.values.is_empty() {
                return Err(EmbeddingError::EmptyEmbedding);
            }

            debug!(
                "Embedding call succeeded: {} dimensions",
                embed_response.embedding.values.len()
            );

            return Ok(embed_response.embedding.values);
        }

        Err(last_error.unwrap_or(EmbeddingError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fixed_embedder_substitutes_for_the_trait() {
        let embedder: Arc<dyn EmbeddingClient> = Arc::new(testing::FixedEmbedder(vec![1.0, 0.0]));
        let v = embedder.embed("anything").await.unwrap();
        assert_eq!(v, vec![1.0, 0.0]);
    }
}
