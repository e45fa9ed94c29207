use async_trait::async_trait;

use super::prompt;
use crate::core::errors::ApiError;

/// Which transport a backend speaks. Parsed from configuration exactly once,
/// inside the factory; every other call site holds the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Cloud,
    Local,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Cloud => "cloud",
            BackendKind::Local => "local",
        }
    }
}

/// A language-model execution target. Implementations hold only configuration
/// captured at construction, so one instance serves concurrent requests.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> BackendKind;

    /// Model identifier this backend was built with.
    fn model_name(&self) -> &str;

    /// Sends an arbitrary prompt with no template wrapping; returns raw text.
    async fn invoke(&self, prompt: &str) -> Result<String, ApiError>;

    /// Renders the fixed context+question template and submits it. A default
    /// method, so the variants cannot diverge on prompt construction.
    async fn generate_response(&self, context: &str, question: &str) -> Result<String, ApiError> {
        self.invoke(&prompt::rag_prompt(context, question)).await
    }
}

impl std::fmt::Debug for dyn GenerationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GenerationBackend({})", self.name())
    }
}
