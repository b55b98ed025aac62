//! Error types for the lookup proxy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lookup_core::{LookupError, UnknownKind};
use serde::Serialize;
use thiserror::Error;

/// Proxy error types.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Lookup(LookupError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ProxyError::Lookup(LookupError::UpstreamReported { status, .. }) => {
                upstream_status(*status)
            }
            ProxyError::Lookup(LookupError::UpstreamInvalid { status, .. }) => {
                status.map_or(StatusCode::BAD_GATEWAY, upstream_status)
            }
            ProxyError::Lookup(LookupError::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::UnknownKind(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Pass an upstream error status through; anything else becomes 502.
fn upstream_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if code.is_client_error() || code.is_server_error() => code,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
