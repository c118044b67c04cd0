//! HTTP server entry point for the leave engine.

use std::env;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;
use leave_engine::store::MemoryStore;

/// Environment variable naming the configuration directory.
const CONFIG_DIR_VAR: &str = "LEAVE_ENGINE_CONFIG";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let bind = config.config().server().bind.clone();
    info!(config_dir = %config_dir, "Loaded configuration");

    let app = create_router(AppState::new(config, MemoryStore::default()));

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Listening on http://{}", bind);
    axum::serve(listener, app).await?;

    Ok(())
}
