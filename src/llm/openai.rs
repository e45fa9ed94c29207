use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::backend::{BackendKind, GenerationBackend};
use crate::core::errors::ApiError;

/// Generation through an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiBackend {
    base_url: String,
    model: String,
    credential: String,
    client: Client,
}

impl OpenAiBackend {
    pub fn new(base_url: String, model: String, credential: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            credential,
            client: Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Cloud
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, prompt: &str) -> Result<String, ApiError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.credential))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::GenerationFailure(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let detail = res.text().await.unwrap_or_default();
            return Err(ApiError::GenerationFailure(format!(
                "chat completion failed with {}: {}",
                status, detail
            )));
        }

        let payload: ChatCompletionResponse = res
            .json()
            .await
            .map_err(|e| ApiError::GenerationFailure(e.to_string()))?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ApiError::GenerationFailure("empty completion response".to_string()))
    }
}
