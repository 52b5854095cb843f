// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    catalog::Catalog,
    db,
    error::AppError,
    models::score_record::{QuizResultResponse, ScoreEntry, SubmitQuizRequest, TopicStats},
    services::quiz::score_attempt,
    state::AppState,
};

/// Submits a quiz attempt and records the score.
///
/// * Answers must be given in question order, one per question.
/// * The score is appended to the score log.
#[utoipa::path(
    post,
    path = "/api/quiz/submit",
    request_body = SubmitQuizRequest,
    responses(
        (status = 200, description = "Quiz scored and recorded", body = QuizResultResponse),
        (status = 400, description = "Wrong number of answers"),
        (status = 404, description = "Unknown topic")
    ),
    tag = "Quiz"
)]
pub async fn submit_quiz(
    State(state): State<AppState>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let topic = state
        .catalog
        .get(&req.topic)
        .ok_or_else(|| AppError::topic_not_found(&req.topic))?;

    let outcome = score_attempt(topic, &req.answers)?;

    db::append_score(&state.pool, &outcome.record())
        .await
        .map_err(|e| {
            tracing::error!("Failed to record quiz score: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(QuizResultResponse::from(outcome)))
}

/// Returns every recorded result, oldest first.
#[utoipa::path(
    get,
    path = "/api/quiz/results",
    responses((status = 200, description = "Score log", body = [ScoreEntry])),
    tag = "Quiz"
)]
pub async fn list_results(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let results = db::list_scores(&pool).await.map_err(|e| {
        tracing::error!("Failed to fetch score log: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(results))
}

/// Per-topic attempt counts and scores, in catalog order.
#[utoipa::path(
    get,
    path = "/api/quiz/stats",
    responses((status = 200, description = "Per-topic statistics", body = [TopicStats])),
    tag = "Quiz"
)]
pub async fn get_stats(
    State(pool): State<SqlitePool>,
    State(catalog): State<Arc<Catalog>>,
) -> Result<impl IntoResponse, AppError> {
    let stats = db::topic_stats(&pool, &catalog.names()).await?;
    Ok(Json(stats))
}
