//! Artsim Core - Domain models, errors, and shared types
//!
//! This crate defines the abstractions shared across the artsim system:
//! - Article records and their search-result projections
//! - Common error types
//! - Configuration management
//! - Seed dataset loading

pub mod config;
pub mod seed;

pub use config::{AppConfig, ConfigError, ServerConfig, StoreConfig};
pub use seed::{load_seed, SeedEntry};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Embedding dimensionality, fixed for the lifetime of the collection.
pub const EMBEDDING_DIM: usize = 312;

/// Maximum rendered length of an article id.
pub const MAX_ID_LEN: usize = 100;

/// Maximum length of title, link, and image_link fields.
pub const MAX_FIELD_LEN: usize = 300;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for artsim operations
#[derive(Error, Debug)]
pub enum ArtsimError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Seed data error: {0}")]
    Seed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ArtsimError>;

// ============================================================================
// Article Models
// ============================================================================

/// A content item with its embedding vector.
///
/// `id` is assigned at ingestion time as the record's position in the
/// seed dataset, and doubles as the point id in the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub link: String,
    pub image_link: String,
    pub embedding: Vec<f32>,
}

impl Article {
    /// Build an article from a seed entry and its dataset position.
    ///
    /// Enforces the collection schema constraints: embedding
    /// dimensionality and bounded field lengths.
    pub fn from_seed(id: u64, entry: SeedEntry) -> Result<Self> {
        if entry.embedding.len() != EMBEDDING_DIM {
            return Err(ArtsimError::Seed(format!(
                "entry {id}: embedding has {} dimensions, expected {EMBEDDING_DIM}",
                entry.embedding.len()
            )));
        }

        for (name, value) in [
            ("title", &entry.title),
            ("link", &entry.link),
            ("image_link", &entry.image_link),
        ] {
            if value.chars().count() > MAX_FIELD_LEN {
                return Err(ArtsimError::Seed(format!(
                    "entry {id}: {name} exceeds {MAX_FIELD_LEN} characters"
                )));
            }
        }

        Ok(Self {
            id,
            title: entry.title,
            link: entry.link,
            image_link: entry.image_link,
            embedding: entry.embedding,
        })
    }

    /// Project to the embedding-free form used in listings.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id,
            title: self.title.clone(),
            link: self.link.clone(),
            image_link: self.image_link.clone(),
        }
    }
}

/// An article without its embedding, as returned by list and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: u64,
    pub title: String,
    pub link: String,
    pub image_link: String,
}

/// A search hit: an article annotated with its distance to the query
/// vector. Lower distance means more similar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: ArticleSummary,
    pub distance: f32,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dim: usize) -> SeedEntry {
        SeedEntry {
            title: "A title".to_string(),
            link: "https://example.com/a".to_string(),
            image_link: "https://example.com/a.png".to_string(),
            embedding: vec![0.5; dim],
        }
    }

    #[test]
    fn article_from_seed_assigns_position_as_id() {
        let article = Article::from_seed(7, entry(EMBEDDING_DIM)).unwrap();
        assert_eq!(article.id, 7);
        assert_eq!(article.title, "A title");
        assert_eq!(article.embedding.len(), EMBEDDING_DIM);
    }

    #[test]
    fn article_from_seed_rejects_wrong_dimension() {
        let err = Article::from_seed(0, entry(16)).unwrap_err();
        assert!(matches!(err, ArtsimError::Seed(_)));
    }

    #[test]
    fn article_from_seed_rejects_oversized_field() {
        let mut e = entry(EMBEDDING_DIM);
        e.title = "x".repeat(MAX_FIELD_LEN + 1);
        let err = Article::from_seed(0, e).unwrap_err();
        assert!(matches!(err, ArtsimError::Seed(_)));
    }

    #[test]
    fn summary_drops_embedding() {
        let article = Article::from_seed(3, entry(EMBEDDING_DIM)).unwrap();
        let summary = article.summary();
        assert_eq!(summary.id, 3);
        assert_eq!(summary.link, article.link);
    }

    #[test]
    fn scored_article_serializes_flat() {
        let article = Article::from_seed(1, entry(EMBEDDING_DIM)).unwrap();
        let scored = ScoredArticle {
            article: article.summary(),
            distance: 0.1234,
        };
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["distance"], 0.1234f32 as f64);
    }
}
