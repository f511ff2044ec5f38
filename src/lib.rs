//! # chat-relay
//!
//! A single-endpoint HTTP relay: `POST /chat` takes a plain-text prompt,
//! forwards it to OpenAI's engine completions API and answers with the
//! generated text.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chat_relay::{OpenAiClient, OpenAiConfig, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::new(OpenAiConfig::from_env())?;
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     server::serve(listener, Arc::new(client)).await?;
//!     Ok(())
//! }
//! ```

pub mod completions;
pub mod core;
pub mod provider;
pub mod server;

pub use core::{CompletionError, CompletionProvider, HttpClientConfig};
pub use provider::{OpenAiClient, OpenAiConfig};
pub use server::{ConfigError, RelayError, ServerConfig};
