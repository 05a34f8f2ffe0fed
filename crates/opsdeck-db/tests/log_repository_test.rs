//! Integration tests for the Log repository using in-memory SurrealDB.

use chrono::{Duration, Utc};
use opsdeck_core::error::OpsError;
use opsdeck_core::models::log::{AppendLog, LogLevel, LogQuery};
use opsdeck_core::repository::LogRepository;
use opsdeck_db::repository::SurrealLogRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    opsdeck_db::run_migrations(&db).await.unwrap();
    db
}

fn entry(level: LogLevel, message: &str, minutes_ago: i64) -> AppendLog {
    AppendLog {
        level,
        message: message.into(),
        source: "api".into(),
        timestamp: Some(Utc::now() - Duration::minutes(minutes_ago)),
    }
}

#[tokio::test]
async fn query_is_newest_first() {
    let db = setup().await;
    let repo = SurrealLogRepository::new(db);

    repo.append(entry(LogLevel::Info, "older", 30)).await.unwrap();
    repo.append(entry(LogLevel::Info, "newer", 5)).await.unwrap();

    let logs = repo.query(LogQuery::default()).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].message, "newer");
    assert_eq!(logs[1].message, "older");
}

#[tokio::test]
async fn level_filter_matches_exactly() {
    let db = setup().await;
    let repo = SurrealLogRepository::new(db);

    repo.append(entry(LogLevel::Error, "boom", 10)).await.unwrap();
    repo.append(entry(LogLevel::Warn, "careful", 8)).await.unwrap();
    repo.append(entry(LogLevel::Error, "boom again", 2))
        .await
        .unwrap();

    let errors = repo
        .query(LogQuery {
            level: Some(LogLevel::Error),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|l| l.level == LogLevel::Error));
}

#[tokio::test]
async fn date_range_is_inclusive() {
    let db = setup().await;
    let repo = SurrealLogRepository::new(db);

    let boundary = Utc::now() - Duration::minutes(10);
    repo.append(AppendLog {
        level: LogLevel::Info,
        message: "on the boundary".into(),
        source: "api".into(),
        timestamp: Some(boundary),
    })
    .await
    .unwrap();
    repo.append(entry(LogLevel::Info, "way before", 120))
        .await
        .unwrap();

    let logs = repo
        .query(LogQuery {
            start_date: Some(boundary),
            end_date: Some(boundary),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].message, "on the boundary");
}

#[tokio::test]
async fn half_open_range_is_rejected() {
    let db = setup().await;
    let repo = SurrealLogRepository::new(db);

    let err = repo
        .query(LogQuery {
            start_date: Some(Utc::now()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OpsError::Validation { .. }));
}

#[tokio::test]
async fn limit_bounds_the_result() {
    let db = setup().await;
    let repo = SurrealLogRepository::new(db);

    for i in 0..5 {
        repo.append(entry(LogLevel::Debug, &format!("entry-{i}"), i))
            .await
            .unwrap();
    }

    let logs = repo
        .query(LogQuery {
            limit: 3,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(logs.len(), 3);

    let err = repo
        .query(LogQuery {
            limit: 0,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OpsError::Validation { .. }));

    let err = repo
        .query(LogQuery {
            limit: 1001,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OpsError::Validation { .. }));
}

#[tokio::test]
async fn count_errors_since_ignores_old_and_other_levels() {
    let db = setup().await;
    let repo = SurrealLogRepository::new(db);

    repo.append(entry(LogLevel::Error, "recent error", 30))
        .await
        .unwrap();
    repo.append(entry(LogLevel::Error, "ancient error", 60 * 48))
        .await
        .unwrap();
    repo.append(entry(LogLevel::Warn, "recent warn", 15))
        .await
        .unwrap();

    let cutoff = Utc::now() - Duration::hours(24);
    assert_eq!(repo.count_errors_since(cutoff).await.unwrap(), 1);
}
