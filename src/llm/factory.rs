use std::sync::Arc;

use super::backend::GenerationBackend;
use super::ollama::OllamaBackend;
use super::openai::OpenAiBackend;
use crate::core::config::AppSettings;
use crate::core::errors::ApiError;

/// The single seam that turns a kind tag into a concrete backend.
pub struct BackendFactory;

impl BackendFactory {
    /// Constructs the backend for `kind`. The settings snapshot supplies the
    /// base URL matching the chosen variant; `"cloud"` additionally requires
    /// a credential.
    pub fn create(
        kind: &str,
        model_name: &str,
        credential: Option<&str>,
        settings: &AppSettings,
    ) -> Result<Arc<dyn GenerationBackend>, ApiError> {
        match kind {
            "cloud" => {
                let credential =
                    credential.ok_or_else(|| ApiError::MissingCredential("cloud".to_string()))?;
                Ok(Arc::new(OpenAiBackend::new(
                    settings.cloud_base_url.clone(),
                    model_name.to_string(),
                    credential.to_string(),
                )))
            }
            "local" => Ok(Arc::new(OllamaBackend::new(
                settings.local_base_url.clone(),
                model_name.to_string(),
            ))),
            other => Err(ApiError::UnknownBackendKind(other.to_string())),
        }
    }

    /// Builds the backend a settings snapshot describes.
    pub fn from_settings(settings: &AppSettings) -> Result<Arc<dyn GenerationBackend>, ApiError> {
        Self::create(
            &settings.llm_model_type,
            &settings.llm_model_name,
            settings.api_credential.as_deref(),
            settings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::backend::BackendKind;

    #[test]
    fn cloud_without_credential_is_rejected() {
        let settings = AppSettings::default();
        let err = BackendFactory::create("cloud", "gpt-4o", None, &settings).unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential(_)));
    }

    #[test]
    fn cloud_with_credential_builds_the_cloud_variant() {
        let settings = AppSettings::default();
        let backend = BackendFactory::create("cloud", "gpt-4o", Some("sk-test"), &settings).unwrap();
        assert_eq!(backend.kind(), BackendKind::Cloud);
        assert_eq!(backend.name(), "openai");
        assert_eq!(backend.model_name(), "gpt-4o");
    }

    #[test]
    fn local_builds_without_credential() {
        let settings = AppSettings::default();
        let backend = BackendFactory::create("local", "llama3:8b", None, &settings).unwrap();
        assert_eq!(backend.kind(), BackendKind::Local);
        assert_eq!(backend.name(), "ollama");
    }

    #[test]
    fn local_ignores_a_supplied_credential() {
        let settings = AppSettings::default();
        let backend =
            BackendFactory::create("local", "llama3:8b", Some("unused"), &settings).unwrap();
        assert_eq!(backend.kind(), BackendKind::Local);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let settings = AppSettings::default();
        let err = BackendFactory::create("mainframe", "m1", Some("key"), &settings).unwrap_err();
        match err {
            ApiError::UnknownBackendKind(kind) => assert_eq!(kind, "mainframe"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_settings_follows_the_snapshot() {
        let mut settings = AppSettings::default();
        settings.llm_model_type = "cloud".to_string();
        settings.llm_model_name = "gpt-4o".to_string();
        settings.api_credential = Some("sk-test".to_string());

        let backend = BackendFactory::from_settings(&settings).unwrap();
        assert_eq!(backend.kind(), BackendKind::Cloud);
        assert_eq!(backend.model_name(), "gpt-4o");
    }
}
