//! Error types for Shelfmark server

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Application error codes reported in [`ErrorResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    DbFailure = 3,
    NoSuchData = 5,
    Duplicate = 8,
}

/// Rejection produced by the shelf assignment pipeline.
///
/// Every variant is attributed to exactly one entity, returned by [`ShelvingError::key`],
/// and its `Display` form is the human-readable message sent to clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShelvingError {
    #[error("There's no shelf found with id {0}")]
    ShelfNotFound(i64),

    #[error("Shelf {shelf} already reached maximum capacity")]
    ShelfFull { shelf: String },

    #[error("There's no book found with id {0}")]
    BookNotFound(i64),

    #[error("Book {book} already exists in shelf {shelf}")]
    AlreadyInShelf { book: String, shelf: String },

    #[error("Book {book} is already shelved in shelf {shelf}")]
    AlreadyShelved { book: String, shelf: String },

    #[error("There's no book {book} in shelf {shelf}")]
    NotInShelf { book: String, shelf: String },
}

impl ShelvingError {
    /// Name of the entity the failure is reported against
    pub fn key(&self) -> &'static str {
        match self {
            ShelvingError::BookNotFound(_) | ShelvingError::AlreadyShelved { .. } => "book",
            ShelvingError::ShelfNotFound(_)
            | ShelvingError::ShelfFull { .. }
            | ShelvingError::AlreadyInShelf { .. }
            | ShelvingError::NotInShelf { .. } => "shelf",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ShelvingError::ShelfNotFound(_) | ShelvingError::BookNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::CONFLICT,
        }
    }

    /// Single-entry `{key: message}` body
    pub fn to_body(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(self.key().to_string(), self.to_string())])
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    Shelving(#[from] ShelvingError),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

/// Flatten validation failures into a `{field: message}` map
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Shelving(e) => {
                return (e.status(), Json(e.to_body())).into_response();
            }
            AppError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(field_messages(errors))).into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone()),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
