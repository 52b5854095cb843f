// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Chat-completion model used for topic explanations.
pub const DEFAULT_CHAT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3:novita";

/// OpenAI-compatible inference router.
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://router.huggingface.co/v1";

pub const DEFAULT_TTS_BASE_URL: &str = "https://translate.google.com";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://results.db";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    /// Inference token. Left unset, explanation requests fail and fall back.
    pub hf_token: Option<String>,
    pub inference_base_url: String,
    pub chat_model: String,
    pub tts_base_url: String,
    pub tts_lang: String,
    pub catalog_path: Option<PathBuf>,
    pub rust_log: String,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            hf_token: None,
            inference_base_url: DEFAULT_INFERENCE_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            tts_base_url: DEFAULT_TTS_BASE_URL.to_string(),
            tts_lang: "en".to_string(),
            catalog_path: None,
            rust_log: "info".to_string(),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Reads configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    /// Unset or blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_address = match get("BIND_ADDRESS") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?,
            None => defaults.bind_address,
        };

        Ok(Self {
            bind_address,
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            hf_token: get("HF_TOKEN"),
            inference_base_url: get("INFERENCE_BASE_URL").unwrap_or(defaults.inference_base_url),
            chat_model: get("CHAT_MODEL").unwrap_or(defaults.chat_model),
            tts_base_url: get("TTS_BASE_URL").unwrap_or(defaults.tts_base_url),
            tts_lang: get("TTS_LANG").unwrap_or(defaults.tts_lang),
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            log_dir: get("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
        })
    }
}
