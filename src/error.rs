use axum::{
    Json,
    extract::rejection::{BytesRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("book not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}

impl From<BytesRejection> for CatalogError {
    fn from(rejection: BytesRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for CatalogError {
    fn from(rejection: PathRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            CatalogError::NotFound => BOOK_NOT_FOUND.to_string(),
            CatalogError::Validation(msg) => {
                tracing::info!(detail = %msg, "rejected request");
                msg
            }
            CatalogError::Storage(e) => {
                tracing::error!(error = %crate::unpack_error(&*e), "storage failure");
                INTERNAL_SERVER_ERROR.to_string()
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
