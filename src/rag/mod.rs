pub mod retriever;
pub mod sqlite;
pub mod store;

pub use retriever::{FormattedContext, Retriever};
pub use sqlite::SqliteVectorStore;
pub use store::{ChunkRecord, RetrievedChunk, VectorStore};
