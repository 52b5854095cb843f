//! Score log storage.
//!
//! Results live in an embedded SQLite database. Every submission is a single
//! INSERT, so concurrent sessions append without overwriting each other.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::models::score_record::{ScoreEntry, ScoreRecord, TopicStats};

/// Opens the score store, creating the database file if it does not exist yet,
/// and applies pending migrations.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Appends one result to the log.
pub async fn append_score(pool: &SqlitePool, record: &ScoreRecord) -> Result<i64, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO results (topic, score) VALUES (?, ?) RETURNING id",
    )
    .bind(&record.topic)
    .bind(record.score)
    .fetch_one(pool)
    .await?;

    tracing::info!(id, topic = %record.topic, score = record.score, "Score recorded");
    Ok(id)
}

/// All results, oldest first.
pub async fn list_scores(pool: &SqlitePool) -> Result<Vec<ScoreEntry>, sqlx::Error> {
    sqlx::query_as::<_, ScoreEntry>(
        "SELECT id, topic, score, recorded_at FROM results ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}

/// Attempt count, best and average score for each topic in `topics`, in the same order.
/// Topics without results report zero attempts.
pub async fn topic_stats(pool: &SqlitePool, topics: &[&str]) -> Result<Vec<TopicStats>, sqlx::Error> {
    let rows: Vec<(String, i64, Option<i64>, Option<f64>)> = sqlx::query_as(
        r#"
        SELECT topic, COUNT(*), MAX(score), AVG(score)
        FROM results
        GROUP BY topic
        "#,
    )
    .fetch_all(pool)
    .await?;

    let stats = topics
        .iter()
        .map(|name| {
            match rows.iter().find(|(topic, ..)| topic == name) {
                Some((topic, attempts, best, avg)) => TopicStats {
                    topic: topic.clone(),
                    attempts: *attempts,
                    best_score: *best,
                    average_score: *avg,
                },
                None => TopicStats {
                    topic: name.to_string(),
                    attempts: 0,
                    best_score: None,
                    average_score: None,
                },
            }
        })
        .collect();

    Ok(stats)
}
