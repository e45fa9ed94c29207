use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::core::config::AppSettings;
use crate::core::errors::ApiError;
use crate::state::AppState;

/// Current settings with the credential masked.
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let settings = state.config.load();
    Ok(Json(state.config.redacted(&settings)))
}

/// Applies a full settings payload. The pipeline is rebuilt before anything
/// is persisted, so a rejected payload changes nothing.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AppSettings>,
) -> Result<impl IntoResponse, ApiError> {
    state.apply_settings(payload).await?;
    Ok(Json(json!({ "status": "success" })))
}
