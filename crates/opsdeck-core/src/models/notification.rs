//! Per-user notification delivery configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FieldError, OpsError, OpsResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub user_id: Uuid,
    pub email_enabled: bool,
    pub slack_enabled: bool,
    pub webhook_enabled: bool,
    pub email: Option<String>,
    pub slack_webhook: Option<String>,
    pub webhook_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationSettings {
    /// All channels disabled — what a user has before their first
    /// update.
    pub fn defaults_for(user_id: Uuid) -> Self {
        Self {
            user_id,
            email_enabled: false,
            slack_enabled: false,
            webhook_enabled: false,
            email: None,
            slack_webhook: None,
            webhook_url: None,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNotificationSettings {
    pub email_enabled: bool,
    pub slack_enabled: bool,
    pub webhook_enabled: bool,
    pub email: Option<String>,
    pub slack_webhook: Option<String>,
    pub webhook_url: Option<String>,
}

impl UpdateNotificationSettings {
    /// Each channel is judged independently: an enabled channel must
    /// carry a non-empty target.
    pub fn validate(&self) -> OpsResult<()> {
        let mut errors = Vec::new();
        let channels = [
            (self.email_enabled, &self.email, "email"),
            (self.slack_enabled, &self.slack_webhook, "slack_webhook"),
            (self.webhook_enabled, &self.webhook_url, "webhook_url"),
        ];
        for (enabled, target, field) in channels {
            let missing = !matches!(target, Some(t) if !t.trim().is_empty());
            if enabled && missing {
                errors.push(FieldError::new(
                    field,
                    format!("{field} is required when the channel is enabled"),
                ));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(OpsError::Validation { errors })
        }
    }
}
