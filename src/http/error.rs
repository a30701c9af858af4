//! Mapping of failures to HTTP responses.
//!
//! Every error a handler can produce passes through [`ApiError`], and every error
//! body has the shape `{"detail": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::parsing::ParseError;
use crate::peer::PeerError;

/// Error returned from request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown set, unknown format or malformed query. Never forwarded.
    InvalidInput(String),
    /// Local parsing failed.
    Parse(ParseError),
    /// Forwarding to the peer failed.
    Peer(PeerError),
    /// No route matches the path.
    NoRoute,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Parse(ParseError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Peer(PeerError::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Peer(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NoRoute => StatusCode::NOT_FOUND,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::InvalidInput(message) => message.clone(),
            ApiError::Parse(e) => e.to_string(),
            ApiError::Peer(e) => e.to_string(),
            ApiError::NoRoute => "Not Found".to_string(),
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(e: ParseError) -> Self {
        ApiError::Parse(e)
    }
}

impl From<PeerError> for ApiError {
    fn from(e: PeerError) -> Self {
        ApiError::Peer(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), detail = %detail, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), detail = %detail, "Request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
