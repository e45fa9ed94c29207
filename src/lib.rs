pub mod core;
pub mod embeddings;
pub mod eval;
pub mod llm;
pub mod pipeline;
pub mod rag;
pub mod server;
pub mod state;
