use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::backend::{BackendKind, GenerationBackend};
use crate::core::errors::ApiError;

/// Generation through a locally running Ollama daemon.
#[derive(Clone)]
pub struct OllamaBackend {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaBackend {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            client: Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, prompt: &str) -> Result<String, ApiError> {
        let url = format!("{}/api/generate", self.base_url);

        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::GenerationFailure(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let detail = res.text().await.unwrap_or_default();
            return Err(ApiError::GenerationFailure(format!(
                "ollama generate error {}: {}",
                status, detail
            )));
        }

        let payload: OllamaGenerateResponse = res
            .json()
            .await
            .map_err(|e| ApiError::GenerationFailure(e.to_string()))?;

        Ok(payload.response)
    }
}
