//! Qdrant implementation of the vector store boundary
//!
//! Binds the collaborator interface to a Qdrant deployment: one
//! collection of articles keyed by dense numeric point ids, with the
//! embedding as the point vector and the descriptive fields as
//! payload.

use crate::VectorStore;
use artsim_core::{
    Article, ArticleSummary, ArtsimError, Result, StoreConfig, EMBEDDING_DIM,
};
use async_trait::async_trait;
use qdrant_client::qdrant::{
    point_id::PointIdOptions, vectors_output::VectorsOptions, CollectionStatus,
    CreateCollectionBuilder, Distance, GetPointsBuilder, HnswConfigDiff, PointId, PointStruct,
    ScrollPointsBuilder, SearchParams, SearchPointsBuilder, UpdateCollectionBuilder,
    UpsertPointsBuilder, Value, VectorParamsBuilder, VectorsOutput,
};
use qdrant_client::Qdrant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// How many records one scroll page requests during fetch_all.
const SCROLL_PAGE: u32 = 256;

/// How long `load` keeps polling for the collection to turn green.
const LOAD_POLL_ATTEMPTS: u32 = 60;
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Qdrant-backed vector store
pub struct QdrantStore {
    client: Qdrant,
    collection: String,
    config: StoreConfig,
}

impl QdrantStore {
    /// Connect to Qdrant and log the server version.
    pub async fn new(config: &StoreConfig) -> Result<Self> {
        let client = Qdrant::from_url(&config.qdrant_url)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ArtsimError::Store(format!("Qdrant connection failed: {e}")))?;

        let health = client
            .health_check()
            .await
            .map_err(|e| ArtsimError::Store(format!("Qdrant health check failed: {e}")))?;
        tracing::info!(version = %health.version, "connected to Qdrant");

        Ok(Self {
            client,
            collection: config.collection.clone(),
            config: config.clone(),
        })
    }

    fn point_id_to_u64(point_id: &PointId) -> Result<u64> {
        match &point_id.point_id_options {
            Some(PointIdOptions::Num(num)) => Ok(*num),
            Some(PointIdOptions::Uuid(other)) => Err(ArtsimError::Store(format!(
                "unexpected non-numeric point id: {other}"
            ))),
            None => Err(ArtsimError::Store("missing point id".to_string())),
        }
    }

    /// Extract vector values from VectorsOutput.
    /// Note: uses the deprecated data field until migration to 1.18+.
    #[allow(deprecated)]
    fn extract_vector(vectors: &Option<VectorsOutput>) -> Option<Vec<f32>> {
        match vectors {
            Some(VectorsOutput {
                vectors_options: Some(VectorsOptions::Vector(v)),
            }) => Some(v.data.clone()),
            Some(VectorsOutput {
                vectors_options: Some(VectorsOptions::Vectors(map)),
            }) => map.vectors.values().next().map(|v| v.data.clone()),
            _ => None,
        }
    }

    fn payload_map(article: &Article) -> HashMap<String, Value> {
        let payload = ArticlePayload {
            title: article.title.clone(),
            link: article.link.clone(),
            image_link: article.image_link.clone(),
        };

        serde_json::to_value(&payload)
            .unwrap_or_default()
            .as_object()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, v.into()))
            .collect()
    }

    fn summary_from_payload(id: u64, payload: &HashMap<String, Value>) -> ArticleSummary {
        let field = |name: &str| {
            payload
                .get(name)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_default()
        };

        ArticleSummary {
            id,
            title: field("title"),
            link: field("link"),
            image_link: field("image_link"),
        }
    }
}

/// Payload stored with each point
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArticlePayload {
    title: String,
    link: String,
    image_link: String,
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn create_collection(&self) -> Result<()> {
        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection).vectors_config(
                    VectorParamsBuilder::new(EMBEDDING_DIM as u64, Distance::Euclid),
                ),
            )
            .await
            .map_err(|e| ArtsimError::Store(format!("failed to create collection: {e}")))?;

        Ok(())
    }

    async fn has_data(&self) -> Result<bool> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| ArtsimError::Store(format!("failed to check collection: {e}")))?;

        if !exists {
            return Ok(false);
        }

        // Presence probe: one page of ids, no payload, no vectors.
        let page = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection)
                    .limit(1)
                    .with_payload(false)
                    .with_vectors(false),
            )
            .await
            .map_err(|e| ArtsimError::Store(format!("presence probe failed: {e}")))?;

        Ok(!page.result.is_empty())
    }

    async fn insert_batch(&self, articles: &[Article]) -> Result<()> {
        let points: Vec<PointStruct> = articles
            .iter()
            .map(|article| {
                PointStruct::new(
                    article.id,
                    article.embedding.clone(),
                    Self::payload_map(article),
                )
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| ArtsimError::Store(format!("bulk insert failed: {e}")))?;

        Ok(())
    }

    async fn build_index(&self) -> Result<()> {
        self.client
            .update_collection(
                UpdateCollectionBuilder::new(&self.collection).hnsw_config(HnswConfigDiff {
                    m: Some(self.config.hnsw_m),
                    ef_construct: Some(self.config.hnsw_ef_construct),
                    ..Default::default()
                }),
            )
            .await
            .map_err(|e| ArtsimError::Store(format!("index build failed: {e}")))?;

        Ok(())
    }

    async fn load(&self) -> Result<()> {
        // Qdrant serves a collection as soon as it is green; polling
        // the status gives the synchronous, idempotent load the
        // bootstrap contract requires.
        for _ in 0..LOAD_POLL_ATTEMPTS {
            let info = self
                .client
                .collection_info(&self.collection)
                .await
                .map_err(|e| ArtsimError::Store(format!("failed to read collection info: {e}")))?;

            let status = info
                .result
                .map(|r| r.status())
                .unwrap_or(CollectionStatus::UnknownCollectionStatus);

            if status == CollectionStatus::Green {
                return Ok(());
            }

            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }

        Err(ArtsimError::Store(format!(
            "collection {} did not become ready",
            self.collection
        )))
    }

    async fn fetch(&self, id: u64) -> Result<Option<Article>> {
        let response = self
            .client
            .get_points(
                GetPointsBuilder::new(&self.collection, vec![PointId::from(id)])
                    .with_payload(true)
                    .with_vectors(true),
            )
            .await
            .map_err(|e| ArtsimError::Store(format!("fetch failed: {e}")))?;

        let Some(point) = response.result.into_iter().next() else {
            return Ok(None);
        };

        let summary = Self::summary_from_payload(id, &point.payload);
        let embedding = Self::extract_vector(&point.vectors)
            .ok_or_else(|| ArtsimError::Store(format!("point {id} has no vector")))?;

        Ok(Some(Article {
            id: summary.id,
            title: summary.title,
            link: summary.link,
            image_link: summary.image_link,
            embedding,
        }))
    }

    async fn fetch_all(&self) -> Result<Vec<ArticleSummary>> {
        let mut summaries = Vec::new();
        let mut offset: Option<PointId> = None;

        loop {
            let mut builder = ScrollPointsBuilder::new(&self.collection)
                .limit(SCROLL_PAGE)
                .with_payload(true)
                .with_vectors(false);
            if let Some(next) = offset.take() {
                builder = builder.offset(next);
            }

            let page = self
                .client
                .scroll(builder)
                .await
                .map_err(|e| ArtsimError::Store(format!("fetch_all failed: {e}")))?;

            for point in &page.result {
                let id = point
                    .id
                    .as_ref()
                    .map(Self::point_id_to_u64)
                    .transpose()?
                    .ok_or_else(|| ArtsimError::Store("missing point id".to_string()))?;
                summaries.push(Self::summary_from_payload(id, &point.payload));
            }

            match page.next_page_offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(summaries)
    }

    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<(ArticleSummary, f32)>> {
        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, vector.to_vec(), k as u64)
                    .with_payload(true)
                    .params(SearchParams {
                        hnsw_ef: Some(self.config.hnsw_ef_search),
                        ..Default::default()
                    }),
            )
            .await
            .map_err(|e| ArtsimError::Search(format!("vector search failed: {e}")))?;

        response
            .result
            .into_iter()
            .map(|point| {
                let id = point
                    .id
                    .as_ref()
                    .map(Self::point_id_to_u64)
                    .transpose()?
                    .ok_or_else(|| ArtsimError::Store("missing point id".to_string()))?;

                // With the Euclid metric Qdrant reports the distance
                // itself, ranked ascending.
                Ok((Self::summary_from_payload(id, &point.payload), point.score))
            })
            .collect()
    }
}
