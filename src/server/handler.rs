use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::Method;
use axum::response::Response;
use tracing::debug;

use super::error::RelayError;
use crate::core::CompletionProvider;

/// State shared by every request. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
}

/// `/chat`: forward the raw body as a prompt and answer with the completion.
///
/// Only `POST` is accepted. The body is read in full with no size cap and
/// decoded lossily as UTF-8. On success the text is written back as-is with
/// no content type.
pub async fn handle_chat(
    State(state): State<AppState>,
    method: Method,
    body: Body,
) -> Result<Response, RelayError> {
    if method != Method::POST {
        return Err(RelayError::MethodNotAllowed(method));
    }

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(RelayError::BodyRead)?;
    let prompt = String::from_utf8_lossy(&bytes);
    debug!(prompt_len = prompt.len(), "relaying chat prompt");

    let text = state.provider.complete(&prompt).await?;

    Ok(Response::new(Body::from(text)))
}
