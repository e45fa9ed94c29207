//! Opt-in smoke tests against a locally running Ollama daemon.
//!
//! Run with `cargo test -- --ignored` after `ollama serve` is up and the
//! `llama3:8b` and `nomic-embed-text` models are pulled.

use std::sync::Arc;

use tempfile::tempdir;

use docask_backend::core::config::AppSettings;
use docask_backend::embeddings::{EmbeddingProvider, OllamaEmbedder};
use docask_backend::eval::evaluate;
use docask_backend::llm::BackendFactory;
use docask_backend::rag::{ChunkRecord, Retriever, SqliteVectorStore};

#[tokio::test]
#[ignore]
async fn live_ollama_embedding() {
    let settings = AppSettings::default();
    let embedder = OllamaEmbedder::new(settings.local_base_url.clone());

    match embedder.embed("hello world").await {
        Ok(vector) => {
            println!("Ollama embedding dimensions: {}", vector.len());
            assert!(!vector.is_empty());
        }
        Err(e) => panic!("Failed to connect to Ollama: {}", e),
    }
}

#[tokio::test]
#[ignore]
async fn live_ollama_generation() {
    let settings = AppSettings::default();
    let backend = BackendFactory::from_settings(&settings).unwrap();

    match backend.invoke("Reply with the single word: pong").await {
        Ok(reply) => {
            println!("Ollama reply: {}", reply);
            assert!(!reply.trim().is_empty());
        }
        Err(e) => panic!("Failed to connect to Ollama: {}", e),
    }
}

#[tokio::test]
#[ignore]
async fn live_ollama_evaluation_round_trip() {
    let dir = tempdir().unwrap();
    let settings = AppSettings::default();

    let embedder = Arc::new(OllamaEmbedder::new(settings.local_base_url.clone()));
    let store = SqliteVectorStore::with_path(dir.path().join("index.db"))
        .await
        .unwrap();

    let record = ChunkRecord::new(
        "The Gamma Innovation Society was founded in 2015.",
        "gamma-society.pdf:7",
    );
    let embedding = match embedder.embed(&record.content).await {
        Ok(embedding) => embedding,
        Err(e) => panic!("Failed to connect to Ollama: {}", e),
    };
    store.insert(&record, &embedding).await.unwrap();

    let retriever = Retriever::new(embedder, Arc::new(store));
    let backend = BackendFactory::from_settings(&settings).unwrap();

    match evaluate(
        "When was the gamma innovation society founded? (Answer with the number only)",
        "2015",
        &retriever,
        backend.as_ref(),
        1,
    )
    .await
    {
        Ok(passed) => {
            println!("Live verdict: {}", passed);
            assert!(passed);
        }
        Err(e) => panic!("Evaluation against Ollama failed: {}", e),
    }
}
