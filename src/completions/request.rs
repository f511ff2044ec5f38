use serde::Serialize;

/// Token budget sent with every prompt unless configured otherwise.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Body of `POST /engines/{engine}/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub max_tokens: u32,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(prompt: &'a str, max_tokens: u32) -> Self {
        Self { prompt, max_tokens }
    }
}
