//! Artsim Store - Vector store boundary and orchestration
//!
//! Defines the trait consumed by the bootstrap controller and the
//! query service, plus the Qdrant implementation. The store engine
//! itself (indexing, distance computation, persistence) lives behind
//! this boundary.

use artsim_core::{Article, ArticleSummary, Result};
use async_trait::async_trait;

/// Operations the orchestration layer needs from a vector store.
///
/// All methods are scoped to the single article collection the
/// deployment owns; the implementation carries the collection name.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection with the fixed schema. Called only when
    /// the presence probe found no data.
    async fn create_collection(&self) -> Result<()>;

    /// Presence probe: does the collection hold at least one record?
    /// A collection that does not exist yet counts as empty.
    async fn has_data(&self) -> Result<bool>;

    /// Insert the full seed batch in a single bulk operation.
    async fn insert_batch(&self, articles: &[Article]) -> Result<()>;

    /// Build the similarity index over the embedding field with the
    /// fixed index family and tuning parameters.
    async fn build_index(&self) -> Result<()>;

    /// Bring the collection into the serving-ready state. Must be
    /// synchronous and idempotent: loading an already-loaded
    /// collection is a no-op, not an error.
    async fn load(&self) -> Result<()>;

    /// Fetch one record by id, embedding included. Absent is
    /// `Ok(None)`, never an error.
    async fn fetch(&self, id: u64) -> Result<Option<Article>>;

    /// Fetch every record, without embeddings, in store-native order.
    async fn fetch_all(&self) -> Result<Vec<ArticleSummary>>;

    /// Nearest-neighbor search: top `k` records by ascending distance
    /// to `vector`, each annotated with its raw distance.
    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<(ArticleSummary, f32)>>;
}

pub mod bootstrap;
pub mod qdrant_store;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use qdrant_store::QdrantStore;
pub use service::ArticleService;
