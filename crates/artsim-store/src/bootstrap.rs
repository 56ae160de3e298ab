//! Bootstrap controller
//!
//! Runs once at startup, before the listener binds: makes sure the
//! article collection exists, is seeded exactly once, is indexed, and
//! is serving-ready. Safe to run on every process start; a populated
//! collection is never re-created, re-inserted, or re-indexed.
//!
//! Not safe against concurrent first-run bootstrap across multiple
//! instances sharing one store; single-process deployment is assumed.

use crate::VectorStore;
use artsim_core::{seed, Result, StoreConfig};

/// Ensure the store is ready to serve queries.
///
/// Any failure here is fatal: the caller must not start accepting
/// requests, and there is no partial-bootstrap recovery.
pub async fn ensure_ready(store: &dyn VectorStore, config: &StoreConfig) -> Result<()> {
    if store.has_data().await? {
        tracing::info!(collection = %config.collection, "collection already initialized, skipping seed");
    } else {
        tracing::info!(collection = %config.collection, "collection empty, running full bootstrap");

        store.create_collection().await?;
        tracing::info!("collection created");

        let articles = seed::load_seed(&config.seed_path)?;
        let count = articles.len();
        store.insert_batch(&articles).await?;
        tracing::info!(count, seed_path = %config.seed_path, "seed data inserted");

        store.build_index().await?;
        tracing::info!("similarity index built");
    }

    // Unconditional: a no-op when the collection is already loaded.
    store.load().await?;
    tracing::info!("collection loaded and serving-ready");

    Ok(())
}
