//! Wire types for the legacy engine completions API.
//!
//! The request carries a prompt and a token budget; the response is read
//! only as far as the first choice's text.

pub mod request;
pub mod response;

pub use request::{CompletionRequest, DEFAULT_MAX_TOKENS};
pub use response::{Choice, Choices, CompletionResponse, parse_completion};
