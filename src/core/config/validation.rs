use super::settings::AppSettings;
use crate::core::errors::ApiError;

const MAX_RELEVANT_DOCS: usize = 100;

/// Structural checks on a settings snapshot. Backend kind strings and
/// credential presence are checked by the factories during pipeline
/// construction, not here.
pub fn validate_settings(settings: &AppSettings) -> Result<(), ApiError> {
    if settings.llm_model_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "llm_model_name must not be empty".to_string(),
        ));
    }

    if settings.num_relevant_docs == 0 {
        return Err(ApiError::BadRequest(
            "num_relevant_docs must be at least 1".to_string(),
        ));
    }

    if settings.num_relevant_docs > MAX_RELEVANT_DOCS {
        return Err(ApiError::BadRequest(format!(
            "num_relevant_docs must be at most {}",
            MAX_RELEVANT_DOCS
        )));
    }

    if settings.cloud_base_url.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "cloud_base_url must not be empty".to_string(),
        ));
    }

    if settings.local_base_url.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "local_base_url must not be empty".to_string(),
        ));
    }

    Ok(())
}
