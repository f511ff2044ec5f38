//! Inbound side of the relay: one route, one handler.

pub mod config;
pub mod error;
pub mod handler;

use std::sync::Arc;

use axum::Router;
use axum::routing::any;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use config::{ConfigError, ServerConfig};
pub use error::RelayError;
pub use handler::{AppState, handle_chat};

use crate::core::CompletionProvider;

pub const CHAT_PATH: &str = "/chat";

/// Build the relay router around a completion provider.
///
/// `/chat` accepts every method so the handler can answer non-POST requests
/// itself. Other paths fall through to axum's 404.
pub fn router(provider: Arc<dyn CompletionProvider>) -> Router {
    Router::new()
        .route(CHAT_PATH, any(handle_chat))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { provider })
}

/// Run the relay on an already bound listener until Ctrl-C.
pub async fn serve(
    listener: TcpListener,
    provider: Arc<dyn CompletionProvider>,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!("Relay listening on {addr}");

    axum::serve(listener, router(provider))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay shut down");
    Ok(())
}

/// Bind `config.addr()` and serve on it.
pub async fn bind_and_serve(
    config: &ServerConfig,
    provider: Arc<dyn CompletionProvider>,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    serve(listener, provider).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
