//! Query-side orchestration: embed, search, shape results for generation.

use std::sync::Arc;

use super::store::{RetrievedChunk, VectorStore};
use crate::core::errors::ApiError;
use crate::embeddings::EmbeddingProvider;

const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Context assembled from retrieved chunks plus the deduplicated source ids,
/// in first-seen rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedContext {
    pub context_text: String,
    pub sources: Vec<String>,
}

pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Embeds `text` and returns the `k` nearest chunks, best match first.
    /// Argument problems are rejected before any network or disk I/O.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<RetrievedChunk>, ApiError> {
        if k == 0 {
            return Err(ApiError::InvalidArgument(
                "number of results must be at least 1".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "query text must not be empty".to_string(),
            ));
        }

        let embedding = self.embedder.embed(text).await?;
        let chunks = self.store.similarity_search(&embedding, k).await?;

        tracing::debug!(
            provider = self.embedder.name(),
            requested = k,
            retrieved = chunks.len(),
            "similarity search complete"
        );

        Ok(chunks)
    }

    /// Joins chunk contents in input order and collects unique sources in
    /// first-seen order. Pure: same input, same output, no side effects.
    pub fn format_results(chunks: &[RetrievedChunk]) -> FormattedContext {
        let context_text = chunks
            .iter()
            .map(|chunk| chunk.content.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        let mut sources: Vec<String> = Vec::new();
        for chunk in chunks {
            if !sources.iter().any(|s| s == &chunk.source_id) {
                sources.push(chunk.source_id.clone());
            }
        }

        FormattedContext {
            context_text,
            sources,
        }
    }
}
