use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::WriteResult;
use thiserror::Error;

/// Error response carrying the `{success: false, message}` body the editor expects.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn unknown_section(slug: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("unknown section `{slug}`"))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(WriteResult::failed(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("section store unavailable: {0}")]
    Store(#[from] service::errors::ServiceError),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
}
