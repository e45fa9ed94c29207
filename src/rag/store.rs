//! Storage contract for the vector index.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::core::errors::ApiError;

/// A chunk in its stored form. Written by the ingestion tool, never by the
/// query pipeline.
#[derive(Debug, Clone)]
pub struct ChunkRecord {
    pub chunk_id: String,
    pub content: String,
    pub source_id: String,
    pub metadata: Option<Value>,
}

impl ChunkRecord {
    pub fn new(content: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            chunk_id: Uuid::new_v4().to_string(),
            content: content.into(),
            source_id: source_id.into(),
            metadata: None,
        }
    }
}

/// One similarity-search hit. Read-only once returned; `rank` starts at 1
/// for the best match.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    pub content: String,
    pub source_id: String,
    pub relevance_score: f32,
    pub rank: usize,
}

/// The read surface the retriever consumes. Mutation lives on the concrete
/// store type so the query pipeline cannot write to the index.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Returns up to `k` chunks sorted by descending relevance, ties kept in
    /// insertion order. A store holding fewer than `k` chunks returns what
    /// it has.
    async fn similarity_search(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<RetrievedChunk>, ApiError>;

    /// Number of chunks indexed.
    async fn count(&self) -> Result<usize, ApiError>;
}
