//! API error handling
//!
//! Every failure maps to a typed JSON body and a distinct status
//! code. Store failures carry a correlation id; the underlying cause
//! is logged server-side and the client-facing message stays generic.

use artsim_core::ArtsimError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Correlation id for server-side log lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            correlation_id: None,
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new("NOT_FOUND", format!("{resource} not found"))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn store_error(correlation_id: Uuid) -> Self {
        let mut err = Self::new("STORE_ERROR", "Vector store operation failed");
        err.correlation_id = Some(correlation_id.to_string());
        err
    }

    pub fn internal_error(correlation_id: Uuid) -> Self {
        let mut err = Self::new("INTERNAL_ERROR", "Internal server error");
        err.correlation_id = Some(correlation_id.to_string());
        err
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Store(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::not_found(&msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::bad_request(msg)),
            AppError::Store(msg) => {
                let correlation_id = Uuid::new_v4();
                tracing::error!(%correlation_id, cause = %msg, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::store_error(correlation_id),
                )
            }
            AppError::Internal(msg) => {
                let correlation_id = Uuid::new_v4();
                tracing::error!(%correlation_id, cause = %msg, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::internal_error(correlation_id),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<ArtsimError> for AppError {
    fn from(err: ArtsimError) -> Self {
        match err {
            ArtsimError::NotFound(msg) => AppError::NotFound(msg),
            ArtsimError::Validation(msg) => AppError::BadRequest(msg),
            ArtsimError::Store(msg) => AppError::Store(msg),
            ArtsimError::Search(msg) => AppError::Store(format!("search: {msg}")),
            ArtsimError::Seed(msg) => AppError::Internal(format!("seed: {msg}")),
            ArtsimError::Config(msg) => AppError::Internal(format!("config: {msg}")),
            ArtsimError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = AppError::NotFound("article 9".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_failure_maps_to_500_with_correlation_id() {
        let response = AppError::Store("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "STORE_ERROR");
        assert!(json["correlation_id"].is_string());
        // The underlying cause must not leak to the client.
        assert!(!json["message"].as_str().unwrap().contains("refused"));
    }

    #[test]
    fn core_errors_convert_to_the_right_kind() {
        let app: AppError = ArtsimError::NotFound("x".to_string()).into();
        assert!(matches!(app, AppError::NotFound(_)));

        let app: AppError = ArtsimError::Validation("x".to_string()).into();
        assert!(matches!(app, AppError::BadRequest(_)));

        let app: AppError = ArtsimError::Store("x".to_string()).into();
        assert!(matches!(app, AppError::Store(_)));
    }
}
