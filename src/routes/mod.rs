//! HTTP route handlers and the client-facing error surface.

pub mod filter;
pub mod health;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use icsift_core::FilterError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced to API clients. Each kind maps to a status class:
/// usage errors are 400, upstream problems are 502. All are terminal for
/// the request; nothing is retried and no partial output is returned.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing query parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("Query parameter 'url' is not a valid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch calendar from {url}: {source}")]
    UpstreamFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Calendar read from {url} was interrupted: {source}")]
    UpstreamRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to load config from {url}: {source}")]
    ConfigFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Config at {url} is not valid: {source}")]
    ConfigInvalid {
        url: String,
        #[source]
        source: FilterError,
    },

    #[error("Failed to process config: {0}")]
    Filter(#[from] FilterError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::InvalidUrl(_) | ApiError::Filter(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UpstreamFetch { .. }
            | ApiError::UpstreamRead { .. }
            | ApiError::ConfigFetch { .. }
            | ApiError::ConfigInvalid { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, "request failed: {}", self);

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
