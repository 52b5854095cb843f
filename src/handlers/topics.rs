// src/handlers/topics.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    catalog::Catalog,
    error::AppError,
    models::{
        explanation::{AUDIO_MIME, ExplanationResponse},
        topic::{TopicDetail, TopicSummary},
    },
    services::{explainer::generate_explanation, speech::generate_speech},
    state::AppState,
    utils::video::embed_url,
};

/// Lists all training topics, in display order.
#[utoipa::path(
    get,
    path = "/api/topics",
    responses((status = 200, description = "All topics", body = [TopicSummary])),
    tag = "Topics"
)]
pub async fn list_topics(State(catalog): State<Arc<Catalog>>) -> impl IntoResponse {
    let topics: Vec<TopicSummary> = catalog.topics().iter().map(TopicSummary::from).collect();
    Json(topics)
}

/// Retrieves a single topic with its quiz questions (answers hidden).
#[utoipa::path(
    get,
    path = "/api/topics/{name}",
    params(("name" = String, Path, description = "Topic name")),
    responses(
        (status = 200, description = "Topic found", body = TopicDetail),
        (status = 404, description = "Unknown topic")
    ),
    tag = "Topics"
)]
pub async fn get_topic(
    State(catalog): State<Arc<Catalog>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let topic = catalog
        .get(&name)
        .ok_or_else(|| AppError::topic_not_found(&name))?;

    Ok(Json(TopicDetail::from(topic)))
}

/// Generates an explanation for the topic, reads it aloud, and returns both with the video link.
///
/// A failed explanation comes back as a fallback message; failed speech leaves `audio_base64` empty.
#[utoipa::path(
    post,
    path = "/api/topics/{name}/explanation",
    params(("name" = String, Path, description = "Topic name")),
    responses(
        (status = 200, description = "Explanation generated", body = ExplanationResponse),
        (status = 404, description = "Unknown topic")
    ),
    tag = "Topics"
)]
pub async fn explain_topic(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let topic = state
        .catalog
        .get(&name)
        .ok_or_else(|| AppError::topic_not_found(&name))?;

    let explanation = generate_explanation(state.explainer.as_ref(), &topic.name).await;
    let audio = generate_speech(state.speech.as_ref(), &explanation).await;

    Ok(Json(ExplanationResponse {
        topic: topic.name.clone(),
        explanation,
        audio_base64: audio.map(|bytes| STANDARD.encode(bytes)),
        audio_mime: AUDIO_MIME.to_string(),
        video_url: topic.video_url.clone(),
        embed_url: embed_url(&topic.video_url),
    }))
}
