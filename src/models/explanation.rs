// src/models/explanation.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const AUDIO_MIME: &str = "audio/mpeg";

/// Result of the "Generate Explanation & Audio" action.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExplanationResponse {
    pub topic: String,

    /// Generated text, or a fallback message if generation failed.
    pub explanation: String,

    /// Base64-encoded MP3 of the explanation. Absent when synthesis failed.
    pub audio_base64: Option<String>,

    pub audio_mime: String,

    pub video_url: String,

    pub embed_url: Option<String>,
}
