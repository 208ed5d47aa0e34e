//! Errors surfaced by the route handlers.
//!
//! Read-path problems (missing store root, unreadable text files, a record vanishing
//! mid-scan) are absorbed by the catalog loader and never reach this type. What remains
//! is either the client's fault (`NotFound`, bad uploads) or a server-side failure.

use actix_multipart::MultipartError;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Coral not found")]
    NotFound,
    #[error("{0}")]
    InvalidUpload(String),
    /// Kept as text: `MultipartError` wraps a non-`Send` error, and this type crosses
    /// `web::block`.
    #[error("malformed upload: {0}")]
    Multipart(String),
    #[error("storage write failed: {0}")]
    Write(#[from] std::io::Error),
    #[error("view rendering failed: {0}")]
    Render(#[from] askama::Error),
    #[error("blocking task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl From<MultipartError> for CatalogError {
    fn from(err: MultipartError) -> Self {
        CatalogError::Multipart(err.to_string())
    }
}

impl ResponseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::InvalidUpload(_) | CatalogError::Multipart(_) => StatusCode::BAD_REQUEST,
            CatalogError::Write(_) | CatalogError::Render(_) | CatalogError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}
