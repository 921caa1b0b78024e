//! Error types for the booking server.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use slot_engine::SlotError;
use thiserror::Error;

/// Failure talking to the upstream calendar.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid service account key: {0}")]
    Credential(String),

    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Calendar request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Calendar API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Calendar '{calendar}' reported errors: {reasons}")]
    Calendar { calendar: String, reasons: String },
}

/// Request-level failures, mapped onto HTTP status codes.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing required query parameter '{0}'")]
    MissingParam(&'static str),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Validation(#[from] SlotError),

    #[error("Failed to fetch calendar availability")]
    Upstream(#[source] SourceError),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) | ApiError::InvalidQuery(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            ApiError::Upstream(source) => builder.json(json!({
                "error": self.to_string(),
                "detail": source.to_string(),
            })),
            ApiError::MethodNotAllowed => builder
                .insert_header((header::ALLOW, "GET, OPTIONS"))
                .json(json!({ "error": self.to_string() })),
            _ => builder.json(json!({ "error": self.to_string() })),
        }
    }
}
