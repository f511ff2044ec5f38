use thiserror::Error;

/// Failures of a single completion call.
///
/// Every variant is terminal for the request that produced it. The HTTP layer
/// collapses all of them into one generic response, so the detail carried here
/// exists for logging.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The request value could not be encoded as JSON.
    #[error("failed to serialize completion request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Connection, DNS, TLS, timeout or body read failure talking to the provider.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a zero-length body.
    #[error("empty response from OpenAI API")]
    EmptyResponse,

    /// The body is not a JSON object.
    #[error("malformed response from OpenAI API: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// `choices` is missing, not a sequence, or empty.
    #[error("unexpected response format from OpenAI API")]
    UnexpectedFormat,

    /// The first choice carries no string `text` field.
    #[error("unable to extract text from OpenAI API response")]
    MissingText,

    /// The outbound client could not be constructed.
    #[error("provider configuration error: {0}")]
    ProviderConfiguration(String),
}
