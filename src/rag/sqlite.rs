//! SQLite-backed vector index.
//!
//! In-process store using SQLite for chunk rows and brute-force cosine
//! similarity for search.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};

use super::store::{ChunkRecord, RetrievedChunk, VectorStore};
use crate::core::config::AppPaths;
use crate::core::errors::ApiError;

const INSERT_CHUNK: &str =
    "INSERT OR REPLACE INTO chunks (chunk_id, content, source_id, metadata, embedding)
     VALUES (?1, ?2, ?3, ?4, ?5)";

fn store_err<E: std::fmt::Display>(err: E) -> ApiError {
    ApiError::StoreUnavailable(err.to_string())
}

pub struct SqliteVectorStore {
    pool: SqlitePool,
    #[allow(dead_code)]
    db_path: PathBuf,
}

impl SqliteVectorStore {
    pub async fn new(paths: &AppPaths) -> Result<Self, ApiError> {
        Self::with_path(paths.index_path.clone()).await
    }

    pub async fn with_path(db_path: PathBuf) -> Result<Self, ApiError> {
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(store_err)?;

        let store = Self { pool, db_path };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), ApiError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS chunks (
                chunk_id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                source_id TEXT NOT NULL DEFAULT '',
                metadata TEXT DEFAULT '{}',
                embedding BLOB,
                created_at TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    fn serialize_embedding(embedding: &[f32]) -> Vec<u8> {
        let mut blob = Vec::with_capacity(embedding.len() * 4);
        for value in embedding {
            blob.extend_from_slice(&value.to_le_bytes());
        }
        blob
    }

    fn deserialize_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|raw| f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
            .collect()
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }

        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;
        for (x, y) in a.iter().zip(b) {
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }

        let denom = (norm_a * norm_b).sqrt();
        if denom <= f32::EPSILON {
            0.0
        } else {
            dot / denom
        }
    }

    fn metadata_text(record: &ChunkRecord) -> String {
        record
            .metadata
            .as_ref()
            .and_then(|m| serde_json::to_string(m).ok())
            .unwrap_or_else(|| "{}".to_string())
    }

    /// Writes one chunk with its embedding. For the ingestion tool and the
    /// test suite; the query pipeline holds only the read trait.
    pub async fn insert(&self, record: &ChunkRecord, embedding: &[f32]) -> Result<(), ApiError> {
        sqlx::query(INSERT_CHUNK)
            .bind(&record.chunk_id)
            .bind(&record.content)
            .bind(&record.source_id)
            .bind(Self::metadata_text(record))
            .bind(Self::serialize_embedding(embedding))
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(())
    }

    /// Writes a batch of chunks in a single transaction.
    pub async fn insert_batch(&self, items: &[(ChunkRecord, Vec<f32>)]) -> Result<(), ApiError> {
        if items.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(store_err)?;

        for (record, embedding) in items {
            sqlx::query(INSERT_CHUNK)
                .bind(&record.chunk_id)
                .bind(&record.content)
                .bind(&record.source_id)
                .bind(Self::metadata_text(record))
                .bind(Self::serialize_embedding(embedding))
                .execute(&mut *tx)
                .await
                .map_err(store_err)?;
        }

        tx.commit().await.map_err(store_err)?;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    async fn similarity_search(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<RetrievedChunk>, ApiError> {
        // rowid order fixes the tie-break: equal scores keep insertion order.
        let rows = sqlx::query("SELECT content, source_id, embedding FROM chunks ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;

        let mut scored: Vec<RetrievedChunk> = rows
            .iter()
            .filter_map(|row| {
                let blob: Vec<u8> = row.get("embedding");
                if blob.is_empty() {
                    return None;
                }
                let stored = Self::deserialize_embedding(&blob);

                Some(RetrievedChunk {
                    content: row.get("content"),
                    source_id: row.get("source_id"),
                    relevance_score: Self::cosine_similarity(embedding, &stored),
                    rank: 0,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        for (idx, chunk) in scored.iter_mut().enumerate() {
            chunk.rank = idx + 1;
        }

        Ok(scored)
    }

    async fn count(&self) -> Result<usize, ApiError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chunks")
            .fetch_one(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> SqliteVectorStore {
        let tmp = std::env::temp_dir().join(format!("docask-index-test-{}.db", uuid::Uuid::new_v4()));
        SqliteVectorStore::with_path(tmp).await.unwrap()
    }

    #[tokio::test]
    async fn insert_and_search() {
        let store = test_store().await;

        let mut record = ChunkRecord::new("Hello world", "doc1");
        record.metadata = Some(serde_json::json!({ "page": 3 }));
        let embedding = vec![1.0, 0.0, 0.0];

        store.insert(&record, &embedding).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);

        let results = store.similarity_search(&embedding, 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "Hello world");
        assert_eq!(results[0].source_id, "doc1");
        assert_eq!(results[0].rank, 1);
        assert!(results[0].relevance_score > 0.99);
    }

    #[tokio::test]
    async fn search_orders_by_similarity_and_caps_at_k() {
        let store = test_store().await;

        store
            .insert_batch(&[
                (ChunkRecord::new("far", "doc-far"), vec![0.0, 1.0]),
                (ChunkRecord::new("near", "doc-near"), vec![1.0, 0.0]),
                (ChunkRecord::new("middle", "doc-mid"), vec![0.8, 0.6]),
            ])
            .await
            .unwrap();

        let results = store.similarity_search(&[1.0, 0.0], 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "near");
        assert_eq!(results[1].content, "middle");
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].rank, 2);
        assert!(results[0].relevance_score >= results[1].relevance_score);
    }

    #[tokio::test]
    async fn fewer_chunks_than_k_is_not_an_error() {
        let store = test_store().await;

        store
            .insert(&ChunkRecord::new("only one", "doc1"), &[1.0, 0.0])
            .await
            .unwrap();

        let results = store.similarity_search(&[1.0, 0.0], 5).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn empty_store_returns_no_results() {
        let store = test_store().await;

        assert_eq!(store.count().await.unwrap(), 0);
        let results = store.similarity_search(&[1.0, 0.0], 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn equal_scores_keep_insertion_order() {
        let store = test_store().await;

        store
            .insert_batch(&[
                (ChunkRecord::new("first", "doc1"), vec![1.0, 0.0]),
                (ChunkRecord::new("second", "doc2"), vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.similarity_search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results[0].content, "first");
        assert_eq!(results[1].content, "second");
    }
}
