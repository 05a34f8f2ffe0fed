//! Notification settings endpoints, scoped to the caller.
//!
//! The owner always comes from the validated token's subject, never
//! from the request body.

use axum::Json;
use axum::extract::State;
use opsdeck_auth::{Capability, authorize};
use opsdeck_core::error::{FieldError, OpsError};
use opsdeck_core::models::notification::{NotificationSettings, UpdateNotificationSettings};
use opsdeck_core::repository::NotificationSettingsRepository;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

pub async fn get_notifications(
    State(state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<NotificationSettings>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let settings = state.notification_settings().get_for_user(caller.id).await?;
    Ok(Json(settings))
}

#[derive(Debug, Deserialize)]
pub struct UpdateNotificationsRequest {
    pub email_enabled: Option<bool>,
    pub slack_enabled: Option<bool>,
    pub webhook_enabled: Option<bool>,
    pub email: Option<String>,
    pub slack_webhook: Option<String>,
    pub webhook_url: Option<String>,
}

pub async fn update_notifications(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<UpdateNotificationsRequest>,
) -> ApiResult<Json<NotificationSettings>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let mut errors = Vec::new();
    for (value, field) in [
        (&req.email_enabled, "email_enabled"),
        (&req.slack_enabled, "slack_enabled"),
        (&req.webhook_enabled, "webhook_enabled"),
    ] {
        if value.is_none() {
            errors.push(FieldError::new(field, format!("{field} is required")));
        }
    }
    if !errors.is_empty() {
        return Err(OpsError::Validation { errors }.into());
    }

    // Per-channel target requirements are enforced by the input's own
    // validation inside the repository, before anything is written.
    let updated = state
        .notification_settings()
        .upsert(
            caller.id,
            UpdateNotificationSettings {
                email_enabled: req.email_enabled.unwrap_or_default(),
                slack_enabled: req.slack_enabled.unwrap_or_default(),
                webhook_enabled: req.webhook_enabled.unwrap_or_default(),
                email: req.email,
                slack_webhook: req.slack_webhook,
                webhook_url: req.webhook_url,
            },
        )
        .await?;

    Ok(Json(updated))
}
