use std::process::ExitCode;
use std::sync::Arc;

use chat_relay::{OpenAiClient, OpenAiConfig, ServerConfig, server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before the subscriber so RUST_LOG can come from it
    let env_loaded = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = env_loaded {
        error!("Failed to load configuration: {e}");
        return ExitCode::FAILURE;
    }

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid server configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match OpenAiClient::new(OpenAiConfig::from_env()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create completion client: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Starting the application...");

    if let Err(e) = server::bind_and_serve(&server_config, Arc::new(client)).await {
        error!(addr = %server_config.addr(), "Server failed: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
