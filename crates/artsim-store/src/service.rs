//! Query service
//!
//! Stateless read operations over the article collection, run after
//! bootstrap has completed: resolve-by-id, list-all, and similarity
//! search (resolve, then nearest-neighbor with the resolved vector).

use crate::VectorStore;
use artsim_core::{Article, ArticleSummary, ArtsimError, Result, ScoredArticle};
use std::sync::Arc;

/// Default number of similar articles returned.
pub const DEFAULT_TOP_K: usize = 10;

/// Distances are rounded to 4 decimal digits before leaving the core.
fn round_distance(distance: f32) -> f32 {
    (distance * 10_000.0).round() / 10_000.0
}

/// High-level article queries over an injected vector store.
#[derive(Clone)]
pub struct ArticleService {
    store: Arc<dyn VectorStore>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Resolve one article by id, embedding included.
    ///
    /// Absence is a normal outcome (`Ok(None)`), not a failure.
    pub async fn get_article(&self, id: u64) -> Result<Option<Article>> {
        self.store.fetch(id).await
    }

    /// All articles, without embeddings, in store-native order.
    pub async fn list_articles(&self) -> Result<Vec<ArticleSummary>> {
        self.store.fetch_all().await
    }

    /// Top `k` nearest neighbors of the article with the given id,
    /// ranked ascending by distance (nearest first).
    ///
    /// An unknown id fails with `NotFound` rather than searching with
    /// an absent vector.
    pub async fn find_similar(&self, id: u64, k: usize) -> Result<Vec<ScoredArticle>> {
        let Some(article) = self.store.fetch(id).await? else {
            return Err(ArtsimError::NotFound(format!("article {id}")));
        };

        let hits = self.store.search(&article.embedding, k).await?;

        Ok(hits
            .into_iter()
            .map(|(summary, distance)| ScoredArticle {
                article: summary,
                distance: round_distance(distance),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use artsim_core::EMBEDDING_DIM;

    fn article(id: u64, fill: f32) -> Article {
        let mut embedding = vec![0.0; EMBEDDING_DIM];
        embedding[0] = fill;
        Article {
            id,
            title: format!("article {id}"),
            link: format!("https://example.com/{id}"),
            image_link: format!("https://example.com/{id}.png"),
            embedding,
        }
    }

    async fn seeded_service(articles: Vec<Article>) -> ArticleService {
        let store = InMemoryStore::new();
        store.create_collection().await.unwrap();
        store.insert_batch(&articles).await.unwrap();
        store.load().await.unwrap();
        ArticleService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn resolve_round_trip() {
        let service = seeded_service(vec![article(0, 0.1), article(1, 0.5)]).await;

        let found = service.get_article(1).await.unwrap().unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(found.title, "article 1");
        assert_eq!(found.embedding[0], 0.5);
    }

    #[tokio::test]
    async fn absent_id_resolves_to_none() {
        let service = seeded_service(vec![article(0, 0.1)]).await;
        assert!(service.get_article(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_every_record_without_embeddings() {
        let service = seeded_service(vec![article(0, 0.1), article(1, 0.5), article(2, 0.9)]).await;

        let all = service.list_articles().await.unwrap();
        assert_eq!(all.len(), 3);
        let mut ids: Vec<u64> = all.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn find_similar_ranks_self_first() {
        let service = seeded_service(vec![article(0, 0.1), article(1, 0.5), article(2, 0.9)]).await;

        let hits = service.find_similar(1, 10).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].article.id, 1);
        assert_eq!(hits[0].distance, 0.0);
        // Non-decreasing distances, nearest first.
        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[tokio::test]
    async fn find_similar_caps_at_k() {
        let service = seeded_service(vec![article(0, 0.1), article(1, 0.5), article(2, 0.9)]).await;

        let hits = service.find_similar(0, 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn find_similar_on_unknown_id_is_not_found() {
        let service = seeded_service(vec![article(0, 0.1)]).await;

        let err = service.find_similar(42, 10).await.unwrap_err();
        assert!(matches!(err, ArtsimError::NotFound(_)));
    }

    #[tokio::test]
    async fn distances_are_rounded_to_four_decimals() {
        let service = seeded_service(vec![article(0, 0.0), article(1, 0.123456)]).await;

        let hits = service.find_similar(0, 10).await.unwrap();
        let other = hits.iter().find(|h| h.article.id == 1).unwrap();
        assert_eq!(other.distance, 0.1235);
    }

    #[test]
    fn rounding_helper() {
        assert_eq!(round_distance(0.123449), 0.1234);
        assert_eq!(round_distance(0.123456), 0.1235);
        assert_eq!(round_distance(0.0), 0.0);
    }
}
