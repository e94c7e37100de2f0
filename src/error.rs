use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// The database refused the write; its message goes back to the client.
    #[error("{0}")]
    Rejected(String),
    #[error("resource not found")]
    NotFound,
    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: DbError,
    },
}

impl ApiError {
    /// Server-side failure with a generic client message. The detail is
    /// logged, not returned.
    pub fn database(context: &'static str) -> impl FnOnce(DbError) -> ApiError {
        move |source| ApiError::Database { context, source }
    }

    /// Data-layer failure surfaced to the client as a 400 with the
    /// database's own message.
    pub fn rejected(fallback: &'static str) -> impl FnOnce(DbError) -> ApiError {
        move |source| {
            let message = match source {
                DbError::Server { message, .. } if !message.is_empty() => message,
                other => {
                    tracing::warn!("{}: {}", fallback, other);
                    fallback.to_string()
                }
            };
            ApiError::Rejected(message)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound => {
                return (StatusCode::NOT_FOUND, Json(serde_json::json!({}))).into_response();
            }
            ApiError::BadRequest(message) | ApiError::Rejected(message) => {
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::Database { context, source } => {
                tracing::error!("{}: {}", context, source);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}
