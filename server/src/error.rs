//! The API error taxonomy and its response mapping.
//!
//! Every failure inside a handler converts into exactly one of these
//! variants at the router boundary; nothing else escapes to the caller.
//! Store errors are logged in full and surfaced as an opaque 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gazette_store::StoreError;
use serde_json::json;

/// Every route the API recognizes, returned with 404 responses as a
/// discoverability aid.
pub const ROUTES: &[&str] = &[
    "GET /api/posts",
    "GET /api/posts/{id}/comments",
    "POST /api/posts/{id}/comments",
    "GET /api/search?q=term",
    "POST /api/newsletter",
    "GET /api/admin/comments",
    "PATCH /api/admin/comments/{id}",
    "DELETE /api/admin/comments/{id}",
    "GET /api/admin/stats",
];

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input. The message is safe to echo.
    #[error("{0}")]
    BadRequest(String),

    /// Admin route without valid credentials. Deliberately carries no
    /// detail about why authentication failed.
    #[error("authentication required")]
    Unauthorized,

    /// A referenced resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// No route matches the request; the response lists what would.
    #[error("no such route")]
    UnknownRoute,

    /// Something failed internally; details are in the log, not the
    /// response.
    #[error("internal server error")]
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            other => {
                tracing::error!(error = %other, "store operation failed");
                Self::Internal
            }
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) | Self::UnknownRoute => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound(_) | Self::UnknownRoute => "not_found",
            Self::Internal => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::UnknownRoute => json!({
                "error": self.kind(),
                "message": self.to_string(),
                "routes": ROUTES,
            }),
            _ => json!({
                "error": self.kind(),
                "message": self.to_string(),
            }),
        };
        (self.status(), Json(body)).into_response()
    }
}
