//! API error translation and the response envelope.
//!
//! Every upload outcome, success or failure, is reported through one
//! envelope shape. Failures carry only fixed client-safe messages; any
//! underlying detail is logged at the call site and never serialised.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

pub type ApiResult<T> = Result<T, ApiError>;

/// Response body shared by success and error outcomes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResponseEnvelope {
    /// `"success"` or `"error"`
    pub status: String,
    pub message: String,
    /// Stored filename; present only on successful uploads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename_saved: Option<String>,
}

impl ResponseEnvelope {
    pub fn success(message: impl Into<String>, filename_saved: impl Into<String>) -> Self {
        Self {
            status: "success".into(),
            message: message.into(),
            filename_saved: Some(filename_saved.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            message: message.into(),
            filename_saved: None,
        }
    }
}

/// A terminal request failure: a status code plus an error envelope.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ResponseEnvelope,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseEnvelope::error(message),
        }
    }

    // 400
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    // 404
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    // 409
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    // 500
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Translates a multipart framing failure, keeping its status code.
    ///
    /// Oversized bodies surface here as 413 from the body-limit layer.
    pub fn from_multipart(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
