pub mod ollama;
pub mod openai;
pub mod provider;

pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use provider::{build_embedder, EmbeddingProvider};
