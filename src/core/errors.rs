use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("embedding backend unavailable: {0}")]
    EmbeddingUnavailable(String),
    #[error("vector store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("missing credential for {0} backend")]
    MissingCredential(String),
    #[error("unknown backend kind: {0}")]
    UnknownBackendKind(String),
    #[error("generation failed: {0}")]
    GenerationFailure(String),
    #[error("ambiguous verdict: {0}")]
    AmbiguousVerdict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::InvalidArgument(_)
            | ApiError::MissingCredential(_)
            | ApiError::UnknownBackendKind(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::EmbeddingUnavailable(_) | ApiError::StoreUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::GenerationFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::AmbiguousVerdict(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
