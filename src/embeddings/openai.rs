use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::provider::EmbeddingProvider;
use crate::core::errors::ApiError;

const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";

/// Embeddings from an OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    base_url: String,
    model: String,
    credential: String,
    client: Client,
}

impl OpenAiEmbedder {
    pub fn new(base_url: String, credential: String) -> Self {
        Self::with_model(base_url, credential, DEFAULT_EMBED_MODEL.to_string())
    }

    pub fn with_model(base_url: String, credential: String, model: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            credential,
            client: Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct OpenAiEmbedResponse {
    data: Vec<OpenAiEmbedItem>,
}

#[derive(Deserialize)]
struct OpenAiEmbedItem {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    fn name(&self) -> &str {
        "openai"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        let url = format!("{}/embeddings", self.base_url);

        let body = json!({
            "model": self.model,
            "input": [text],
        });

        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.credential))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::EmbeddingUnavailable(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let detail = res.text().await.unwrap_or_default();
            return Err(ApiError::EmbeddingUnavailable(format!(
                "embeddings request failed with {}: {}",
                status, detail
            )));
        }

        let payload: OpenAiEmbedResponse = res
            .json()
            .await
            .map_err(|e| ApiError::EmbeddingUnavailable(e.to_string()))?;

        payload
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| ApiError::EmbeddingUnavailable("empty embedding response".to_string()))
    }
}
