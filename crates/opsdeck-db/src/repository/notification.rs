//! SurrealDB implementation of [`NotificationSettingsRepository`].
//!
//! One record per user, keyed by the owner's user id. A user with no
//! record gets all-channels-disabled defaults on read.

use chrono::{DateTime, Utc};
use opsdeck_core::error::OpsResult;
use opsdeck_core::models::notification::{NotificationSettings, UpdateNotificationSettings};
use opsdeck_core::repository::NotificationSettingsRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct NotificationRow {
    email_enabled: bool,
    slack_enabled: bool,
    webhook_enabled: bool,
    email: Option<String>,
    slack_webhook: Option<String>,
    webhook_url: Option<String>,
    updated_at: DateTime<Utc>,
}

impl NotificationRow {
    fn into_settings(self, user_id: Uuid) -> NotificationSettings {
        NotificationSettings {
            user_id,
            email_enabled: self.email_enabled,
            slack_enabled: self.slack_enabled,
            webhook_enabled: self.webhook_enabled,
            email: self.email,
            slack_webhook: self.slack_webhook,
            webhook_url: self.webhook_url,
            updated_at: self.updated_at,
        }
    }
}

/// SurrealDB implementation of the NotificationSettings repository.
#[derive(Clone)]
pub struct SurrealNotificationSettingsRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealNotificationSettingsRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> NotificationSettingsRepository
    for SurrealNotificationSettingsRepository<C>
{
    async fn get_for_user(&self, user_id: Uuid) -> OpsResult<NotificationSettings> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('notification_settings', $user_id)")
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<NotificationRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| row.into_settings(user_id))
            .unwrap_or_else(|| NotificationSettings::defaults_for(user_id)))
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        input: UpdateNotificationSettings,
    ) -> OpsResult<NotificationSettings> {
        input.validate()?;

        let result = self
            .db
            .query(
                "UPSERT type::record('notification_settings', $user_id) SET \
                 email_enabled = $email_enabled, \
                 slack_enabled = $slack_enabled, \
                 webhook_enabled = $webhook_enabled, \
                 email = $email, \
                 slack_webhook = $slack_webhook, \
                 webhook_url = $webhook_url, \
                 updated_at = time::now()",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("email_enabled", input.email_enabled))
            .bind(("slack_enabled", input.slack_enabled))
            .bind(("webhook_enabled", input.webhook_enabled))
            .bind(("email", input.email))
            .bind(("slack_webhook", input.slack_webhook))
            .bind(("webhook_url", input.webhook_url))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<NotificationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "notification_settings".into(),
            id: user_id.to_string(),
        })?;

        Ok(row.into_settings(user_id))
    }
}
