//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the article API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Artsim API",
        description = "Article similarity search over a vector store"
    ),
    paths(
        crate::handlers::articles::list_articles,
        crate::handlers::articles::get_article,
        crate::handlers::articles::similar_articles,
        crate::handlers::health::health_check,
        crate::handlers::health::readiness_check,
    ),
    components(schemas(
        crate::handlers::articles::ArticleResponse,
        crate::handlers::articles::ArticleSummaryResponse,
        crate::handlers::articles::SimilarArticleResponse,
        crate::handlers::health::HealthResponse,
        crate::handlers::health::ReadinessResponse,
        crate::handlers::health::ReadinessChecks,
        crate::error::ApiError,
    )),
    tags(
        (name = "articles", description = "Article lookup and similarity search"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
