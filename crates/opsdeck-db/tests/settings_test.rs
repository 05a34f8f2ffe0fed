//! Integration tests for system and notification settings repositories.

use opsdeck_core::error::OpsError;
use opsdeck_core::models::notification::UpdateNotificationSettings;
use opsdeck_core::models::settings::{SystemSettings, UpdateSystemSettings};
use opsdeck_core::repository::{NotificationSettingsRepository, SystemSettingsRepository};
use opsdeck_db::repository::{
    SurrealNotificationSettingsRepository, SurrealSystemSettingsRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    opsdeck_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn system_settings_default_before_first_write() {
    let db = setup().await;
    let repo = SurrealSystemSettingsRepository::new(db);

    let settings = repo.get().await.unwrap();
    assert_eq!(settings, SystemSettings::default());
}

#[tokio::test]
async fn system_settings_upsert_and_reread() {
    let db = setup().await;
    let repo = SurrealSystemSettingsRepository::new(db);

    let updated = repo
        .update(UpdateSystemSettings {
            backup_enabled: false,
            notification_enabled: true,
            backup_frequency: Some("weekly".into()),
        })
        .await
        .unwrap();
    assert!(!updated.backup_enabled);
    assert_eq!(updated.backup_frequency, "weekly");

    // Single record: a second update overwrites, no history.
    let again = repo
        .update(UpdateSystemSettings {
            backup_enabled: true,
            notification_enabled: false,
            backup_frequency: None,
        })
        .await
        .unwrap();
    assert!(again.backup_enabled);
    assert!(!again.notification_enabled);
    // Absent frequency keeps the stored value.
    assert_eq!(again.backup_frequency, "weekly");

    let read_back = repo.get().await.unwrap();
    assert_eq!(read_back, again);
}

#[tokio::test]
async fn notification_settings_default_to_disabled_channels() {
    let db = setup().await;
    let repo = SurrealNotificationSettingsRepository::new(db);

    let user_id = Uuid::new_v4();
    let settings = repo.get_for_user(user_id).await.unwrap();
    assert_eq!(settings.user_id, user_id);
    assert!(!settings.email_enabled);
    assert!(!settings.slack_enabled);
    assert!(!settings.webhook_enabled);
    assert!(settings.email.is_none());
}

#[tokio::test]
async fn notification_settings_are_scoped_per_user() {
    let db = setup().await;
    let repo = SurrealNotificationSettingsRepository::new(db);

    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    repo.upsert(
        owner,
        UpdateNotificationSettings {
            email_enabled: true,
            email: Some("ops@example.com".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let owner_settings = repo.get_for_user(owner).await.unwrap();
    assert!(owner_settings.email_enabled);
    assert_eq!(owner_settings.email.as_deref(), Some("ops@example.com"));

    // The other user still sees pristine defaults.
    let other_settings = repo.get_for_user(other).await.unwrap();
    assert!(!other_settings.email_enabled);
}

#[tokio::test]
async fn enabled_channel_without_target_is_rejected_without_writing() {
    let db = setup().await;
    let repo = SurrealNotificationSettingsRepository::new(db);

    let user_id = Uuid::new_v4();
    let err = repo
        .upsert(
            user_id,
            UpdateNotificationSettings {
                email_enabled: true,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    match err {
        OpsError::Validation { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "email");
        }
        other => panic!("expected Validation, got {other:?}"),
    }

    // Nothing was written.
    let settings = repo.get_for_user(user_id).await.unwrap();
    assert!(!settings.email_enabled);
}

#[tokio::test]
async fn notification_upsert_overwrites_previous_values() {
    let db = setup().await;
    let repo = SurrealNotificationSettingsRepository::new(db);

    let user_id = Uuid::new_v4();
    repo.upsert(
        user_id,
        UpdateNotificationSettings {
            email_enabled: true,
            email: Some("first@example.com".into()),
            slack_enabled: true,
            slack_webhook: Some("https://hooks.slack.example/T000".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let updated = repo
        .upsert(
            user_id,
            UpdateNotificationSettings {
                email_enabled: false,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!updated.email_enabled);
    assert!(!updated.slack_enabled);
    assert!(updated.slack_webhook.is_none());
}
