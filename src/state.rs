// src/state.rs

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::services::{
    explainer::{ExplanationClient, OpenAICompatibleClient},
    speech::{GoogleTranslateTts, SpeechClient},
};
use axum::extract::FromRef;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub explainer: Arc<dyn ExplanationClient>,
    pub speech: Arc<dyn SpeechClient>,
}

impl AppState {
    /// Wires the hosted explanation and speech services described by `config`.
    pub fn new(pool: SqlitePool, config: Config, catalog: Catalog) -> Self {
        let explainer = OpenAICompatibleClient::new(
            &config.inference_base_url,
            config.hf_token.as_deref().unwrap_or_default(),
            config.chat_model.clone(),
        );
        let speech = GoogleTranslateTts::new(&config.tts_base_url, &config.tts_lang);

        Self {
            pool,
            config,
            catalog: Arc::new(catalog),
            explainer: Arc::new(explainer),
            speech: Arc::new(speech),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}
