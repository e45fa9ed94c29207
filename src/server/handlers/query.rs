use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::rag::Retriever;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct QueryRequest {
    pub query_text: String,
}

pub async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<QueryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pipeline = state.pipeline().await;

    let chunks = pipeline
        .retriever
        .query(&payload.query_text, pipeline.num_relevant_docs)
        .await?;
    let formatted = Retriever::format_results(&chunks);

    let answer = pipeline
        .backend
        .generate_response(&formatted.context_text, &payload.query_text)
        .await?;

    tracing::info!(
        question_len = payload.query_text.len(),
        chunks = chunks.len(),
        backend = pipeline.backend.name(),
        "query answered"
    );

    Ok(Json(json!({
        "response": render_response(&answer, &formatted.sources)
    })))
}

/// Answer text followed by the deduplicated source list. No source block
/// when nothing was retrieved.
fn render_response(answer: &str, sources: &[String]) -> String {
    if sources.is_empty() {
        return answer.to_string();
    }

    format!("{}\n\nSources:\n{}", answer, sources.join("\n"))
}
