//! System settings endpoints.

use axum::Json;
use axum::extract::State;
use opsdeck_auth::{Capability, authorize};
use opsdeck_core::error::{FieldError, OpsError};
use opsdeck_core::models::settings::{SystemSettings, UpdateSystemSettings};
use opsdeck_core::repository::SystemSettingsRepository;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

pub async fn get_settings(
    State(state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<SystemSettings>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let settings = state.system_settings().get().await?;
    Ok(Json(settings))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub backup_enabled: Option<bool>,
    pub notification_enabled: Option<bool>,
    pub backup_frequency: Option<String>,
}

pub async fn update_settings(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<UpdateSettingsRequest>,
) -> ApiResult<Json<SystemSettings>> {
    authorize(caller.role, Capability::ManageSettings)?;

    let mut errors = Vec::new();
    if req.backup_enabled.is_none() {
        errors.push(FieldError::new(
            "backup_enabled",
            "backup_enabled is required",
        ));
    }
    if req.notification_enabled.is_none() {
        errors.push(FieldError::new(
            "notification_enabled",
            "notification_enabled is required",
        ));
    }
    if !errors.is_empty() {
        return Err(OpsError::Validation { errors }.into());
    }

    let updated = state
        .system_settings()
        .update(UpdateSystemSettings {
            backup_enabled: req.backup_enabled.unwrap_or_default(),
            notification_enabled: req.notification_enabled.unwrap_or_default(),
            backup_frequency: req.backup_frequency,
        })
        .await?;

    Ok(Json(updated))
}
