//! Text-to-speech through the Google Translate TTS endpoint.

use anyhow::{Result, bail};
use async_trait::async_trait;

/// Longest text the TTS endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Converts text into encoded audio bytes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechClient: Send + Sync {
    /// Returns MP3 data for `text`.
    async fn synthesize(&self, text: String) -> Result<Vec<u8>>;
}

pub struct GoogleTranslateTts {
    http: reqwest::Client,
    base_url: String,
    lang: String,
}

impl GoogleTranslateTts {
    pub fn new(base_url: &str, lang: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            lang: lang.to_string(),
        }
    }
}

#[async_trait]
impl SpeechClient for GoogleTranslateTts {
    async fn synthesize(&self, text: String) -> Result<Vec<u8>> {
        let chunks = split_text(&text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            bail!("No text to speak");
        }

        let url = format!("{}/translate_tts", self.base_url);
        let total = chunks.len().to_string();
        let mut audio = Vec::new();

        // MP3 frames concatenate cleanly, so chunk payloads are appended in order.
        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let bytes = self
                .http
                .get(&url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", self.lang.as_str()),
                    ("q", chunk.as_str()),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            bail!("TTS service returned no audio");
        }
        Ok(audio)
    }
}

/// Splits `text` into whitespace-separated chunks of at most `max_chars` characters.
/// Words longer than `max_chars` are cut on character boundaries.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Produces audio for `text`, or `None` if synthesis fails.
///
/// Audio is optional on the page, so failures are logged and swallowed.
pub async fn generate_speech(client: &dyn SpeechClient, text: &str) -> Option<Vec<u8>> {
    match client.synthesize(text.to_string()).await {
        Ok(audio) => Some(audio),
        Err(e) => {
            tracing::error!("Error with text-to-speech: {}", e);
            None
        }
    }
}
