//! Pipeline assembly from a settings snapshot.

use std::sync::Arc;

use crate::core::config::{AppPaths, AppSettings};
use crate::core::errors::ApiError;
use crate::embeddings::build_embedder;
use crate::llm::{BackendFactory, GenerationBackend};
use crate::rag::{Retriever, SqliteVectorStore};

/// Everything a query needs, built from one settings snapshot. Replaced
/// wholesale on reconfiguration, never mutated.
pub struct QueryPipeline {
    pub retriever: Retriever,
    pub backend: Arc<dyn GenerationBackend>,
    pub num_relevant_docs: usize,
}

impl std::fmt::Debug for QueryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPipeline")
            .field("backend", &self.backend)
            .field("num_relevant_docs", &self.num_relevant_docs)
            .finish_non_exhaustive()
    }
}

/// Builds a pipeline: embedder, store, retriever, backend, in that order.
/// The first construction error aborts the whole build, so a bad snapshot
/// never yields a half-wired pipeline.
pub async fn build_pipeline(
    settings: &AppSettings,
    paths: &AppPaths,
) -> Result<QueryPipeline, ApiError> {
    let embedder = build_embedder(settings)?;

    let store = match &settings.index_path {
        Some(path) => SqliteVectorStore::with_path(path.clone()).await?,
        None => SqliteVectorStore::new(paths).await?,
    };

    let retriever = Retriever::new(embedder, Arc::new(store));
    let backend = BackendFactory::from_settings(settings)?;

    tracing::info!(
        backend = backend.name(),
        model = backend.model_name(),
        "query pipeline ready"
    );

    Ok(QueryPipeline {
        retriever,
        backend,
        num_relevant_docs: settings.num_relevant_docs,
    })
}
