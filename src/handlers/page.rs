// src/handlers/page.rs
//
// Server-rendered training page. Each user action is one request; the selected
// topic travels in the query string or the quiz form.

use std::collections::HashMap;

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;

use crate::{
    catalog::Catalog,
    db,
    error::AppError,
    models::{explanation::AUDIO_MIME, topic::Topic},
    services::{
        explainer::generate_explanation,
        quiz::{QuizOutcome, score_attempt},
        speech::generate_speech,
    },
    state::AppState,
    utils::{
        html::{escape_text, text_to_html},
        video::embed_url,
    },
};

/// Query parameters of the page. `generate` and `show_quiz` are independent
/// flags; both sections render when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub topic: Option<String>,
    pub generate: Option<String>,
    pub show_quiz: Option<String>,
}

/// HTML rendering of an `AppError`.
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if let AppError::InternalServerError(msg) = &self.0 {
            tracing::error!("Internal Server Error: {}", msg);
        }
        let body = format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Error</title></head>\
             <body><h1>Something went wrong</h1><p class=\"error\">{}</p>\
             <p><a href=\"/\">Back to training</a></p></body></html>",
            escape_text(&self.0.public_message())
        );
        (self.0.status(), Html(body)).into_response()
    }
}

fn resolve_topic<'a>(catalog: &'a Catalog, name: Option<&str>) -> Result<&'a Topic, AppError> {
    match name {
        Some(name) => catalog.get(name).ok_or_else(|| AppError::topic_not_found(name)),
        None => Ok(catalog.first()),
    }
}

/// Renders the training page for the selected topic and runs the requested actions.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, PageError> {
    let topic = resolve_topic(&state.catalog, query.topic.as_deref())?;

    let mut sections = String::new();

    if query.generate.is_some() {
        let explanation = generate_explanation(state.explainer.as_ref(), &topic.name).await;
        let audio = generate_speech(state.speech.as_ref(), &explanation).await;
        sections.push_str(&render_explanation(topic, &explanation, audio.as_deref()));
    }

    if query.show_quiz.is_some() {
        sections.push_str(&render_quiz_form(topic));
    }

    Ok(Html(render_page(&state.catalog, topic, &sections)))
}

/// Scores a submitted quiz form (`topic`, `answer_0`, `answer_1`, ...) and records the result.
pub async fn submit_quiz_form(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let name = form
        .get("topic")
        .ok_or_else(|| AppError::BadRequest("Missing topic".to_string()))?;
    let topic = resolve_topic(&state.catalog, Some(name))?;

    let answers: Vec<String> = (0..)
        .map_while(|i| form.get(&format!("answer_{}", i)).cloned())
        .collect();
    let outcome = score_attempt(topic, &answers).map_err(AppError::from)?;

    // The score is shown even if it could not be saved.
    let saved = match db::append_score(&state.pool, &outcome.record()).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("Failed to record quiz score: {:?}", e);
            false
        }
    };

    let sections = render_result(&outcome, saved);
    Ok(Html(render_page(&state.catalog, topic, &sections)))
}

fn render_page(catalog: &Catalog, topic: &Topic, sections: &str) -> String {
    let options: String = catalog
        .names()
        .into_iter()
        .map(|name| {
            let selected = if name == topic.name { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{}>{}</option>",
                escape_text(name),
                selected,
                escape_text(name)
            )
        })
        .collect();

    let topic_value = escape_text(&topic.name);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Training Module</title>
</head>
<body>
<aside class="sidebar">
<h2>📚 Training Topics</h2>
<form method="get" action="/">
<label for="topic">🎓 Choose a Topic</label>
<select id="topic" name="topic" onchange="this.form.submit()">{options}</select>
<noscript><button type="submit">Select</button></noscript>
</form>
</aside>
<main>
<h1 style="text-align: center;">AI-Enabled Sustainability Training</h1>
<p style="text-align: center;">Select a topic to explore safety and sustainability practices using AI explanations, audio, and quizzes.</p>
<h3>Topic: {topic_label}</h3>
<form method="get" action="/" class="actions">
<input type="hidden" name="topic" value="{topic_value}">
<button type="submit" name="generate" value="1">✨ Generate Explanation &amp; Audio</button>
<button type="submit" name="show_quiz" value="1">📝 Take Quiz</button>
</form>
{sections}
</main>
<hr>
<footer><p style="text-align: center; color: gray;">© 2025 · AI-Powered Learning</p></footer>
</body>
</html>
"#,
        options = options,
        topic_label = topic_value,
        topic_value = topic_value,
        sections = sections,
    )
}

fn render_explanation(topic: &Topic, explanation: &str, audio: Option<&[u8]>) -> String {
    let mut html = String::new();

    html.push_str("<section id=\"explanation\">\n<h4>📖 AI Explanation</h4>\n");
    html.push_str(&format!("<p>{}</p>\n</section>\n", text_to_html(explanation)));

    if let Some(bytes) = audio {
        html.push_str(&format!(
            "<section id=\"audio\">\n<h4>🔊 Listen to the Explanation</h4>\n\
             <audio controls src=\"data:{};base64,{}\"></audio>\n</section>\n",
            AUDIO_MIME,
            STANDARD.encode(bytes)
        ));
    }

    html.push_str("<section id=\"video\">\n<h4>📺 Watch Topic Video</h4>\n");
    match embed_url(&topic.video_url) {
        Some(src) => html.push_str(&format!(
            "<iframe width=\"560\" height=\"315\" src=\"{}\" allowfullscreen></iframe>\n",
            escape_text(&src)
        )),
        None => html.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            escape_text(&topic.video_url),
            escape_text(&topic.video_url)
        )),
    }
    html.push_str("</section>\n");

    html
}

fn render_quiz_form(topic: &Topic) -> String {
    let mut html = String::from(
        "<section id=\"quiz\">\n<h3>🧪 Quick Quiz</h3>\n<form method=\"post\" action=\"/quiz\">\n",
    );
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"topic\" value=\"{}\">\n",
        escape_text(&topic.name)
    ));

    for (idx, question) in topic.questions.iter().enumerate() {
        html.push_str(&format!(
            "<fieldset>\n<legend>{}</legend>\n",
            escape_text(&question.prompt)
        ));
        for (opt_idx, option) in question.options.iter().enumerate() {
            let checked = if opt_idx == 0 { " checked" } else { "" };
            html.push_str(&format!(
                "<label><input type=\"radio\" name=\"answer_{}\" value=\"{}\"{}> {}</label><br>\n",
                idx,
                escape_text(option),
                checked,
                escape_text(option)
            ));
        }
        html.push_str("</fieldset>\n");
    }

    html.push_str("<button type=\"submit\">Submit Quiz</button>\n</form>\n</section>\n");
    html
}

fn render_result(outcome: &QuizOutcome, saved: bool) -> String {
    let mut html = format!(
        "<section id=\"result\">\n<p class=\"success\">✅ You scored {}/{}</p>\n",
        outcome.score, outcome.total
    );

    if outcome.passed() {
        html.push_str(&format!("<p class=\"celebrate\">🎉 {}</p>\n", outcome.message()));
    } else {
        html.push_str(&format!("<p class=\"info\">📌 {}</p>\n", outcome.message()));
    }

    if !saved {
        html.push_str("<p class=\"warning\">⚠️ Your score could not be saved.</p>\n");
    }

    html.push_str("</section>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_safety() -> Topic {
        Catalog::builtin().get("Machine Safety").cloned().unwrap()
    }

    #[test]
    fn test_resolve_defaults_to_first_topic() {
        let catalog = Catalog::builtin();
        let topic = resolve_topic(&catalog, None).unwrap();
        assert_eq!(topic.name, "Machine Safety");
        assert!(resolve_topic(&catalog, Some("Nope")).is_err());
    }

    #[test]
    fn test_explanation_without_audio_still_has_video() {
        let html = render_explanation(&machine_safety(), "Stay safe.", None);
        assert!(html.contains("id=\"explanation\""));
        assert!(!html.contains("<audio"));
        assert!(html.contains(&escape_text("https://www.youtube.com/embed/WQMAazVc4KY")));
    }

    #[test]
    fn test_explanation_with_audio_embeds_data_uri() {
        let html = render_explanation(&machine_safety(), "Stay safe.", Some(&[1u8, 2, 3][..]));
        assert!(html.contains("data:audio/mpeg;base64,AQID"));
    }

    #[test]
    fn test_model_output_is_escaped() {
        let html = render_explanation(&machine_safety(), "<script>x</script>", None);
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_quiz_form_has_one_group_per_question() {
        let html = render_quiz_form(&machine_safety());
        assert!(html.contains("name=\"answer_0\""));
        assert!(html.contains("name=\"answer_1\""));
        assert!(!html.contains("name=\"answer_2\""));
        assert_eq!(html.matches(" checked").count(), 2);
    }

    #[test]
    fn test_result_framing() {
        let full = QuizOutcome {
            topic: "Machine Safety".to_string(),
            score: 2,
            total: 2,
        };
        let html = render_result(&full, true);
        assert!(html.contains("You scored 2/2"));
        assert!(html.contains("celebrate"));
        assert!(!html.contains("warning"));

        let partial = QuizOutcome { score: 1, ..full };
        let html = render_result(&partial, false);
        assert!(html.contains("You scored 1/2"));
        assert!(html.contains("Please review the explanation"));
        assert!(html.contains("could not be saved"));
    }
}
