use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::state::AppState;

pub async fn health(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let pipeline = state.pipeline().await;

    // A store that cannot be counted reads as empty rather than failing the probe.
    let indexed_chunks = match pipeline.retriever.store().count().await {
        Ok(count) => count,
        Err(err) => {
            tracing::warn!("Failed to count indexed chunks: {}", err);
            0
        }
    };

    Ok(Json(json!({
        "backend_kind": pipeline.backend.kind().as_str(),
        "model": pipeline.backend.model_name(),
        "embedding_provider": pipeline.retriever.embedder_name(),
        "indexed_chunks": indexed_chunks,
        "num_relevant_docs": pipeline.num_relevant_docs,
    })))
}
