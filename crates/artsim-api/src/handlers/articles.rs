//! Article query handlers

use crate::error::AppError;
use crate::state::AppState;
use artsim_core::{Article, ArticleSummary, ScoredArticle};
use artsim_store::service::DEFAULT_TOP_K;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// A full article record, embedding included
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    /// Dense seed-position id
    #[schema(example = 1)]
    pub id: u64,

    /// Article title
    #[schema(example = "Rust 1.80 released")]
    pub title: String,

    /// Canonical article URL
    pub link: String,

    /// Cover image URL
    pub image_link: String,

    /// 312-dimension embedding vector
    pub embedding: Vec<f32>,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            link: article.link,
            image_link: article.image_link,
            embedding: article.embedding,
        }
    }
}

/// An article without its embedding
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleSummaryResponse {
    #[schema(example = 1)]
    pub id: u64,
    pub title: String,
    pub link: String,
    pub image_link: String,
}

impl From<ArticleSummary> for ArticleSummaryResponse {
    fn from(summary: ArticleSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            link: summary.link,
            image_link: summary.image_link,
        }
    }
}

/// A ranked similarity hit
#[derive(Debug, Serialize, ToSchema)]
pub struct SimilarArticleResponse {
    #[schema(example = 1)]
    pub id: u64,
    pub title: String,
    pub link: String,
    pub image_link: String,

    /// L2 distance to the query article, rounded to 4 decimals;
    /// lower means more similar
    #[schema(example = 0.1234)]
    pub distance: f32,
}

impl From<ScoredArticle> for SimilarArticleResponse {
    fn from(hit: ScoredArticle) -> Self {
        Self {
            id: hit.article.id,
            title: hit.article.title,
            link: hit.article.link,
            image_link: hit.article.image_link,
            distance: hit.distance,
        }
    }
}

fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid article id: {raw}")))
}

/// List every article, without embeddings, in store-native order
#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "articles",
    responses(
        (status = 200, description = "All articles", body = [ArticleSummaryResponse]),
        (status = 500, description = "Store failure", body = crate::error::ApiError)
    )
)]
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let articles = state.service.list_articles().await?;
    let response: Vec<ArticleSummaryResponse> =
        articles.into_iter().map(Into::into).collect();

    Ok((StatusCode::OK, Json(response)))
}

/// Get a single article by id
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    tag = "articles",
    params(
        ("id" = u64, Path, description = "Article id")
    ),
    responses(
        (status = 200, description = "Article found", body = ArticleResponse),
        (status = 400, description = "Malformed id", body = crate::error::ApiError),
        (status = 404, description = "No such article", body = crate::error::ApiError)
    )
)]
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let id = parse_id(&id)?;
    let article = state
        .service
        .get_article(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("article {id}")))?;

    Ok((StatusCode::OK, Json(ArticleResponse::from(article))))
}

/// Nearest neighbors of an article, ranked by ascending distance
#[utoipa::path(
    get,
    path = "/api/articles/{id}/similar",
    tag = "articles",
    params(
        ("id" = u64, Path, description = "Article id to search from")
    ),
    responses(
        (status = 200, description = "Ranked matches", body = [SimilarArticleResponse]),
        (status = 400, description = "Malformed id", body = crate::error::ApiError),
        (status = 404, description = "No such article", body = crate::error::ApiError)
    )
)]
pub async fn similar_articles(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let id = parse_id(&id)?;
    let hits = state.service.find_similar(id, DEFAULT_TOP_K).await?;
    let response: Vec<SimilarArticleResponse> = hits.into_iter().map(Into::into).collect();

    Ok((StatusCode::OK, Json(response)))
}
