//! Error types for the relay.
//!
//! `AppError` implements `IntoResponse` so handlers can return it directly.
//! Upstream detail is kept for server-side logs and never rendered to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

pub const NOT_CONFIGURED_MESSAGE: &str = "Chat service is not configured";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "AI Server Error";

/// Failure talking to the generation API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to generation API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("generation API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode generation API response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Chat service is not configured")]
    NotConfigured,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                NOT_CONFIGURED_MESSAGE.to_string(),
            ),
            Self::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UPSTREAM_FAILURE_MESSAGE.to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
