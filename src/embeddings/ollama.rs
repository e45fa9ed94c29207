use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::provider::EmbeddingProvider;
use crate::core::errors::ApiError;

const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// Embeddings from a local Ollama daemon.
#[derive(Clone)]
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaEmbedder {
    pub fn new(base_url: String) -> Self {
        Self::with_model(base_url, DEFAULT_EMBED_MODEL.to_string())
    }

    pub fn with_model(base_url: String, model: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            client: Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        let url = format!("{}/api/embed", self.base_url);

        let body = json!({
            "model": self.model,
            "input": [text],
        });

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::EmbeddingUnavailable(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let detail = res.text().await.unwrap_or_default();
            return Err(ApiError::EmbeddingUnavailable(format!(
                "ollama embed error {}: {}",
                status, detail
            )));
        }

        let payload: OllamaEmbedResponse = res
            .json()
            .await
            .map_err(|e| ApiError::EmbeddingUnavailable(e.to_string()))?;

        payload
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::EmbeddingUnavailable("empty embedding response".to_string()))
    }
}
