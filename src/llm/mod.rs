pub mod backend;
pub mod factory;
pub mod ollama;
pub mod openai;
pub mod prompt;

pub use backend::{BackendKind, GenerationBackend};
pub use factory::BackendFactory;
pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;
