//! Mapping from relay failures to HTTP responses.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::core::CompletionError;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Invalid request method";
pub const BODY_READ_MESSAGE: &str = "Error reading request body";
pub const COMPLETION_FAILED_MESSAGE: &str = "Error getting response from OpenAI";

/// Why a `/chat` request failed.
///
/// The caller only ever sees the fixed message for each variant. The wrapped
/// errors are logged when the response is built.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::BodyRead(_) | RelayError::Completion(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed(_) => METHOD_NOT_ALLOWED_MESSAGE,
            RelayError::BodyRead(_) => BODY_READ_MESSAGE,
            RelayError::Completion(_) => COMPLETION_FAILED_MESSAGE,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match &self {
            RelayError::MethodNotAllowed(method) => {
                warn!(%method, "rejected chat request")
            }
            RelayError::BodyRead(err) => error!(error = %err, "failed to read chat request body"),
            RelayError::Completion(err) => error!(error = %err, "completion request failed"),
        }

        (self.status(), self.public_message()).into_response()
    }
}
