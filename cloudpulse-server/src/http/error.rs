//! API error types with IntoResponse
//!
//! Unlike most services, error bodies here carry the full diagnostic text.
//! Exposing exactly why a connectivity attempt failed is part of what the
//! portal is for, so provisioning and query failures are not collapsed
//! into a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use cloudpulse_core::ValidationError;

use crate::db::{DbError, ProvisionError};

/// API error type with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Validation failed (400)
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Could not provision a database handle (503)
    #[error("{0}")]
    Provision(#[from] ProvisionError),

    /// Query failed after a successful provision (500)
    #[error("{0}")]
    Database(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Provision(e) => {
                tracing::error!("provisioning failed: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "provision_error")
            }
            Self::Database(e) => {
                tracing::error!("query failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
        };

        let body = Json(json!({
            "error": kind,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty {
            field: "visitor name",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn provision_error_is_503() {
        let err = ApiError::Provision(ProvisionError::ConnectFailed(
            "connection refused".into(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn database_error_is_500() {
        let err = ApiError::Database(DbError::Sqlx(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn diagnostic_text_is_preserved() {
        let err = ApiError::Provision(ProvisionError::ConnectFailed(
            "Access denied for user 'portal'@'10.0.0.4'".into(),
        ));
        assert!(err.to_string().contains("Access denied"));
    }
}
