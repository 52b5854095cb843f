// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::{page, quiz, topics},
    models::{
        explanation::ExplanationResponse,
        score_record::{QuizResultResponse, ScoreEntry, SubmitQuizRequest, TopicStats},
        topic::{PublicQuestion, TopicDetail, TopicSummary},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        topics::list_topics,
        topics::get_topic,
        topics::explain_topic,
        quiz::submit_quiz,
        quiz::list_results,
        quiz::get_stats,
    ),
    components(schemas(
        TopicSummary,
        TopicDetail,
        PublicQuestion,
        ExplanationResponse,
        SubmitQuizRequest,
        QuizResultResponse,
        ScoreEntry,
        TopicStats
    )),
    tags(
        (name = "Topics", description = "Training topics, explanations and audio"),
        (name = "Quiz", description = "Quiz scoring and the score log")
    )
)]
pub struct ApiDoc;

/// Assembles the main application router.
///
/// * HTML page at `/` with the quiz form posting to `/quiz`.
/// * JSON API under `/api`, documented at `/swagger-ui`.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let topic_routes = Router::new()
        .route("/", get(topics::list_topics))
        .route("/{name}", get(topics::get_topic))
        .route("/{name}/explanation", post(topics::explain_topic));

    let quiz_routes = Router::new()
        .route("/submit", post(quiz::submit_quiz))
        .route("/results", get(quiz::list_results))
        .route("/stats", get(quiz::get_stats));

    let page_routes = Router::new()
        .route("/", get(page::index))
        .route("/quiz", post(page::submit_quiz_form));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "ok" }))
        .merge(page_routes)
        .nest("/api/topics", topic_routes)
        .nest("/api/quiz", quiz_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_api_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/topics",
            "/api/topics/{name}",
            "/api/topics/{name}/explanation",
            "/api/quiz/submit",
            "/api/quiz/results",
            "/api/quiz/stats",
        ] {
            assert!(paths.iter().any(|p| *p == expected), "missing {expected}");
        }
    }
}
