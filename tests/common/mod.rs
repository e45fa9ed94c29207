use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use docask_backend::core::errors::ApiError;
use docask_backend::embeddings::EmbeddingProvider;
use docask_backend::llm::{BackendKind, GenerationBackend};

/// Embeds text as its keyword-hit pattern over a fixed vocabulary, so texts
/// sharing a keyword land near each other without any model behind them.
pub struct KeywordEmbedder {
    vocab: Vec<&'static str>,
}

impl KeywordEmbedder {
    pub fn new(vocab: &[&'static str]) -> Self {
        Self {
            vocab: vocab.to_vec(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        let lowered = text.to_lowercase();
        Ok(self
            .vocab
            .iter()
            .map(|word| if lowered.contains(word) { 1.0 } else { 0.0 })
            .collect())
    }
}

/// Pops one scripted reply per invoke and records every prompt it saw.
pub struct ScriptedBackend {
    kind: BackendKind,
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(kind: BackendKind, replies: &[&str]) -> Self {
        Self {
            kind,
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }

    async fn invoke(&self, prompt: &str) -> Result<String, ApiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::GenerationFailure("script exhausted".to_string()))
    }
}
