use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::AppSettings;
use crate::core::errors::ApiError;

use super::ollama::OllamaEmbedder;
use super::openai::OpenAiEmbedder;

/// Turns text into a fixed-length vector for similarity search.
///
/// Implementations hold only configuration captured at construction, so a
/// single instance is safe for concurrent use. The same text against the
/// same backend and model yields the same vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError>;
}

impl std::fmt::Debug for dyn EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmbeddingProvider({})", self.name())
    }
}

/// Selects the embedding provider for a settings snapshot.
///
/// The cloud variant needs a credential up front so a misconfigured reload
/// fails here instead of on the first query.
pub fn build_embedder(settings: &AppSettings) -> Result<Arc<dyn EmbeddingProvider>, ApiError> {
    match settings.embedding_model_name.as_str() {
        "local" => Ok(Arc::new(OllamaEmbedder::new(
            settings.local_base_url.clone(),
        ))),
        "cloud" => {
            let credential = settings.api_credential.clone().ok_or_else(|| {
                ApiError::EmbeddingUnavailable(
                    "cloud embedding provider configured without an api credential".to_string(),
                )
            })?;
            Ok(Arc::new(OpenAiEmbedder::new(
                settings.cloud_base_url.clone(),
                credential,
            )))
        }
        other => Err(ApiError::UnknownBackendKind(other.to_string())),
    }
}
