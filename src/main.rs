// src/main.rs

use anyhow::Context;
use sustainability_training::catalog::Catalog;
use sustainability_training::config::Config;
use sustainability_training::db;
use sustainability_training::routes;
use sustainability_training::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env().context("Failed to load configuration")?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if config.hf_token.is_none() {
        tracing::warn!("HF_TOKEN is not set; explanations will fall back to an error message.");
    }

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    };
    tracing::info!("Loaded {} training topics", catalog.topics().len());

    // Open the score store (created on first run) and apply migrations
    let pool = db::connect(&config.database_url)
        .await
        .context("Failed to open score store")?;
    tracing::info!("Score store ready at {}", config.database_url);

    let addr = config.bind_address;
    let state = AppState::new(pool, config, catalog);

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
