use async_trait::async_trait;

use super::error::CompletionError;

/// Turns a prompt into generated text.
///
/// The HTTP handler only sees this trait, so tests can swap the real
/// provider for a stub.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
