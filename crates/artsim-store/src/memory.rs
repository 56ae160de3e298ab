//! In-memory vector store for tests
//!
//! Implements the full store boundary with real L2 distances so the
//! bootstrap controller, query service, and HTTP surface can be
//! exercised without a live Qdrant. Available behind the
//! `test-utils` feature.

use crate::VectorStore;
use artsim_core::{Article, ArticleSummary, ArtsimError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    created: bool,
    loaded: bool,
    index_built: bool,
    insert_calls: u32,
    articles: Vec<Article>,
    failing: bool,
}

/// Mutex-guarded in-memory store double.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated as if bootstrap had already run.
    pub fn seeded(articles: Vec<Article>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock().unwrap();
            inner.created = true;
            inner.index_built = true;
            inner.articles = articles;
        }
        store
    }

    /// Make every subsequent operation fail with a store error.
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().unwrap().failing = failing;
    }

    pub fn record_count(&self) -> usize {
        self.inner.lock().unwrap().articles.len()
    }

    pub fn insert_calls(&self) -> u32 {
        self.inner.lock().unwrap().insert_calls
    }

    pub fn index_built(&self) -> bool {
        self.inner.lock().unwrap().index_built
    }

    pub fn loaded(&self) -> bool {
        self.inner.lock().unwrap().loaded
    }

    fn check_failing(inner: &Inner) -> Result<()> {
        if inner.failing {
            Err(ArtsimError::Store("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn create_collection(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failing(&inner)?;
        if inner.created {
            return Err(ArtsimError::Store("collection already exists".to_string()));
        }
        inner.created = true;
        Ok(())
    }

    async fn has_data(&self) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        Self::check_failing(&inner)?;
        Ok(!inner.articles.is_empty())
    }

    async fn insert_batch(&self, articles: &[Article]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failing(&inner)?;
        if !inner.created {
            return Err(ArtsimError::Store("collection does not exist".to_string()));
        }
        inner.insert_calls += 1;
        inner.articles.extend_from_slice(articles);
        Ok(())
    }

    async fn build_index(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failing(&inner)?;
        inner.index_built = true;
        Ok(())
    }

    async fn load(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failing(&inner)?;
        // Idempotent by contract.
        inner.loaded = true;
        Ok(())
    }

    async fn fetch(&self, id: u64) -> Result<Option<Article>> {
        let inner = self.inner.lock().unwrap();
        Self::check_failing(&inner)?;
        Ok(inner.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<ArticleSummary>> {
        let inner = self.inner.lock().unwrap();
        Self::check_failing(&inner)?;
        Ok(inner.articles.iter().map(Article::summary).collect())
    }

    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<(ArticleSummary, f32)>> {
        let inner = self.inner.lock().unwrap();
        Self::check_failing(&inner)?;

        let mut hits: Vec<(ArticleSummary, f32)> = inner
            .articles
            .iter()
            .map(|a| (a.summary(), l2_distance(&a.embedding, vector)))
            .collect();

        hits.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_distance_basics() {
        assert_eq!(l2_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(l2_distance(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn failing_store_errors_every_operation() {
        let store = InMemoryStore::seeded(vec![]);
        store.set_failing(true);
        assert!(store.has_data().await.is_err());
        assert!(store.fetch_all().await.is_err());
        assert!(store.search(&[0.0], 1).await.is_err());
    }
}
