//! Error types for Bookshelf server

use axum::{
    extract::rejection::{FormRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::repository::StoreError;

/// Error codes reported in JSON error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    ConnectionFailure = 2,
    QueryFailure = 3,
    InsertFailure = 4,
    UpdateFailure = 5,
    DeleteFailure = 6,
    NoSuchBook = 7,
    BadValue = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Every storage failure is a 500, including `NotFound`.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Internal(_) => ErrorCode::Failure,
            AppError::Store(e) => match e {
                StoreError::Connection(_) => ErrorCode::ConnectionFailure,
                StoreError::Query(_) => ErrorCode::QueryFailure,
                StoreError::Insert(_) => ErrorCode::InsertFailure,
                StoreError::Update { .. } => ErrorCode::UpdateFailure,
                StoreError::Delete { .. } => ErrorCode::DeleteFailure,
                StoreError::NotFound(_) => ErrorCode::NoSuchBook,
            },
        }
    }

    /// Message safe to show to clients. Backend details only go to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Store(StoreError::NotFound(id)) => format!("Book {} not found", id),
            AppError::Store(StoreError::Connection(_)) => "Book store unavailable".to_string(),
            AppError::Store(StoreError::Query(_)) => "Failed to retrieve books".to_string(),
            AppError::Store(StoreError::Insert(_)) => "Failed to create book".to_string(),
            AppError::Store(StoreError::Update { id, .. }) => {
                format!("Failed to update book {}", id)
            }
            AppError::Store(StoreError::Delete { id, .. }) => {
                format!("Failed to delete book {}", id)
            }
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Log server-side failures; validation errors are the client's problem.
    pub fn log(&self) {
        match self {
            AppError::Validation(msg) => tracing::debug!("Rejected request: {}", msg),
            AppError::Store(e) => tracing::error!("Storage error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let code = self.code();
        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message: self.public_message(),
        });

        (self.status(), body).into_response()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(format!("Invalid book id: {}", rejection.body_text()))
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(format!("Invalid form: {}", rejection.body_text()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
