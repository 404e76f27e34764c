//! Shared query error type for feature endpoints
//!
//! Keeps the error taxonomy explicit: invalid request parameters answer 400,
//! backing-store faults answer 500. Domain not-found conditions never pass
//! through here; they are encoded in the result envelope by the handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::router::RouterError;

/// Errors a query handler can fail with
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid pagination: {0}")]
    Pagination(&'static str),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("Database query failed: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            QueryError::Pagination(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            QueryError::Router(RouterError::EmptySpecies) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            },
            QueryError::Router(RouterError::UnknownSpecies(_)) => {
                // Handlers answer unknown species with a not-found envelope
                // before queries run; reaching this arm means a handler bug,
                // so fall back to a client error with the router message.
                (StatusCode::BAD_REQUEST, self.to_string())
            },
            QueryError::Router(RouterError::Sqlx(ref e)) => {
                tracing::error!("Database error during routing: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            },
            QueryError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            },
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_error_is_bad_request() {
        let response = QueryError::Pagination("Offset must not be negative").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_is_internal() {
        let response = QueryError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_empty_species_is_bad_request() {
        let response = QueryError::Router(RouterError::EmptySpecies).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
