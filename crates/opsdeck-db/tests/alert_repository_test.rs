//! Integration tests for the Alert repository using in-memory SurrealDB.

use opsdeck_core::error::OpsError;
use opsdeck_core::models::alert::{AlertStatus, CreateAlert, Severity, UpdateAlert};
use opsdeck_core::repository::AlertRepository;
use opsdeck_db::repository::SurrealAlertRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    opsdeck_db::run_migrations(&db).await.unwrap();
    db
}

fn high_cpu() -> CreateAlert {
    CreateAlert {
        name: "High CPU".into(),
        condition: "cpu > 90".into(),
        severity: Severity::High,
        description: Some("CPU usage above 90% for 5 minutes".into()),
    }
}

#[tokio::test]
async fn create_applies_defaults() {
    let db = setup().await;
    let repo = SurrealAlertRepository::new(db);

    let alert = repo.create(high_cpu()).await.unwrap();

    assert_eq!(alert.name, "High CPU");
    assert_eq!(alert.condition, "cpu > 90");
    assert_eq!(alert.severity, Severity::High);
    assert!(alert.enabled);
    assert_eq!(alert.status, AlertStatus::Active);
}

#[tokio::test]
async fn missing_description_defaults_to_empty() {
    let db = setup().await;
    let repo = SurrealAlertRepository::new(db);

    let alert = repo
        .create(CreateAlert {
            description: None,
            ..high_cpu()
        })
        .await
        .unwrap();

    assert_eq!(alert.description, "");
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let db = setup().await;
    let repo = SurrealAlertRepository::new(db);

    let err = repo
        .create(CreateAlert {
            name: String::new(),
            condition: "  ".into(),
            severity: Severity::Low,
            description: None,
        })
        .await
        .unwrap_err();

    match err {
        OpsError::Validation { errors } => {
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["name", "condition"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_newest_first() {
    let db = setup().await;
    let repo = SurrealAlertRepository::new(db);

    for i in 0..3 {
        repo.create(CreateAlert {
            name: format!("alert-{i}"),
            condition: "disk > 80".into(),
            severity: Severity::Medium,
            description: None,
        })
        .await
        .unwrap();
    }

    let alerts = repo.list().await.unwrap();
    assert_eq!(alerts.len(), 3);
    for window in alerts.windows(2) {
        assert!(window[0].created_at >= window[1].created_at);
    }
}

#[tokio::test]
async fn toggle_flips_only_enabled() {
    let db = setup().await;
    let repo = SurrealAlertRepository::new(db);

    let alert = repo.create(high_cpu()).await.unwrap();
    assert!(alert.enabled);

    let toggled = repo.toggle_enabled(alert.id).await.unwrap();
    assert!(!toggled.enabled);

    // Field isolation: nothing but `enabled` changed.
    assert_eq!(toggled.name, alert.name);
    assert_eq!(toggled.condition, alert.condition);
    assert_eq!(toggled.severity, alert.severity);
    assert_eq!(toggled.status, alert.status);
    assert_eq!(toggled.description, alert.description);
    assert_eq!(toggled.created_at, alert.created_at);

    // Toggling back restores the original value.
    let restored = repo.toggle_enabled(alert.id).await.unwrap();
    assert!(restored.enabled);
}

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let db = setup().await;
    let repo = SurrealAlertRepository::new(db);

    let alert = repo.create(high_cpu()).await.unwrap();

    let updated = repo
        .update(
            alert.id,
            UpdateAlert {
                severity: Some(Severity::Low),
                status: Some(AlertStatus::Resolved),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.severity, Severity::Low);
    assert_eq!(updated.status, AlertStatus::Resolved);
    assert_eq!(updated.name, alert.name); // unchanged
    assert_eq!(updated.condition, alert.condition); // unchanged
    assert!(updated.enabled); // unchanged
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let db = setup().await;
    let repo = SurrealAlertRepository::new(db);

    let err = repo
        .update(uuid::Uuid::new_v4(), UpdateAlert::default())
        .await
        .unwrap_err();
    assert!(matches!(err, OpsError::NotFound { .. }));
}

#[tokio::test]
async fn count_active_ignores_resolved() {
    let db = setup().await;
    let repo = SurrealAlertRepository::new(db);

    let a = repo.create(high_cpu()).await.unwrap();
    repo.create(CreateAlert {
        name: "Low disk".into(),
        condition: "disk > 95".into(),
        severity: Severity::Medium,
        description: None,
    })
    .await
    .unwrap();
    assert_eq!(repo.count_active().await.unwrap(), 2);

    repo.update(
        a.id,
        UpdateAlert {
            status: Some(AlertStatus::Resolved),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(repo.count_active().await.unwrap(), 1);
}
