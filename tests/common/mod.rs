// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use sustainability_training::{
    catalog::Catalog,
    config::Config,
    db, routes,
    services::{explainer::ExplanationClient, speech::SpeechClient},
    state::AppState,
};

/// Explanation service stand-in: either a canned reply or a canned failure.
pub struct FakeExplainer(pub Result<String, String>);

#[async_trait]
impl ExplanationClient for FakeExplainer {
    async fn complete(&self, _prompt: String) -> anyhow::Result<String> {
        self.0.clone().map_err(|e| anyhow!(e))
    }
}

/// Speech service stand-in: `None` simulates a synthesis failure.
pub struct FakeSpeech(pub Option<Vec<u8>>);

#[async_trait]
impl SpeechClient for FakeSpeech {
    async fn synthesize(&self, _text: String) -> anyhow::Result<Vec<u8>> {
        self.0.clone().ok_or_else(|| anyhow!("503 Service Unavailable"))
    }
}

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
}

pub async fn memory_pool() -> SqlitePool {
    // A single long-lived connection keeps the in-memory database alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");
    db::run_migrations(&pool)
        .await
        .expect("Failed to migrate database");
    pool
}

/// Spawns the app on a random port with the given external services.
pub async fn spawn_app(explainer: FakeExplainer, speech: FakeSpeech) -> TestApp {
    let pool = memory_pool().await;

    let state = AppState {
        pool: pool.clone(),
        config: Config {
            rust_log: "error".to_string(),
            ..Config::default()
        },
        catalog: Arc::new(Catalog::builtin()),
        explainer: Arc::new(explainer),
        speech: Arc::new(speech),
    };

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, pool }
}

pub async fn spawn_default_app() -> TestApp {
    spawn_app(
        FakeExplainer(Ok("Wear your PPE and switch off idle machines.".to_string())),
        FakeSpeech(Some(vec![0xFF, 0xFB, 0x90, 0x64])),
    )
    .await
}
