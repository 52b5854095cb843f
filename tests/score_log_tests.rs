// tests/score_log_tests.rs

use sustainability_training::{db, models::score_record::ScoreRecord};

fn record(topic: &str, score: i64) -> ScoreRecord {
    ScoreRecord {
        topic: topic.to_string(),
        score,
    }
}

async fn read_all(url: &str) -> Vec<ScoreRecord> {
    let pool = db::connect(url).await.expect("Failed to open score store");
    let records = db::list_scores(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(ScoreRecord::from)
        .collect();
    pool.close().await;
    records
}

#[tokio::test]
async fn first_append_creates_log_with_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.db");
    let url = format!("sqlite://{}", path.display());
    assert!(!path.exists());

    let pool = db::connect(&url).await.unwrap();
    db::append_score(&pool, &record("Plantation", 2)).await.unwrap();
    pool.close().await;

    assert!(path.exists());
    assert_eq!(read_all(&url).await, vec![record("Plantation", 2)]);
}

#[tokio::test]
async fn appends_survive_reopening_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("results.db").display());

    let pool = db::connect(&url).await.unwrap();
    db::append_score(&pool, &record("Machine Safety", 1)).await.unwrap();
    db::append_score(&pool, &record("Sustainability", 2)).await.unwrap();
    pool.close().await;

    // A later session adds to the existing log
    let pool = db::connect(&url).await.unwrap();
    db::append_score(&pool, &record("Machine Safety", 2)).await.unwrap();
    pool.close().await;

    assert_eq!(
        read_all(&url).await,
        vec![
            record("Machine Safety", 1),
            record("Sustainability", 2),
            record("Machine Safety", 2),
        ]
    );
}

#[tokio::test]
async fn concurrent_appends_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("results.db").display());
    let pool = db::connect(&url).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            db::append_score(&pool, &record("Water Conservation", i % 3)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(db::list_scores(&pool).await.unwrap().len(), 10);
}
