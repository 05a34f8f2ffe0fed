//! Alert management endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use opsdeck_auth::{Capability, authorize};
use opsdeck_core::error::OpsError;
use opsdeck_core::models::alert::{Alert, AlertStatus, CreateAlert, Severity, UpdateAlert};
use opsdeck_core::repository::AlertRepository;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser, parse_id};
use crate::state::AppState;

pub async fn list_alerts(
    State(state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<Vec<Alert>>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let alerts = state.alerts().list().await?;
    Ok(Json(alerts))
}

#[derive(Debug, Deserialize)]
pub struct CreateAlertRequest {
    pub name: Option<String>,
    pub condition: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
}

pub async fn create_alert(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateAlertRequest>,
) -> ApiResult<(StatusCode, Json<Alert>)> {
    authorize(caller.role, Capability::ManageAlerts)?;

    let severity = req
        .severity
        .as_deref()
        .and_then(Severity::parse)
        .ok_or_else(|| {
            OpsError::invalid_field("severity", "severity must be one of low, medium, high")
        })?;

    let created = state
        .alerts()
        .create(CreateAlert {
            name: req.name.unwrap_or_default(),
            condition: req.condition.unwrap_or_default(),
            severity,
            description: req.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAlertRequest {
    pub name: Option<String>,
    pub condition: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

pub async fn update_alert(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateAlertRequest>,
) -> ApiResult<Json<Alert>> {
    authorize(caller.role, Capability::ManageAlerts)?;

    let id = parse_id(&id)?;

    let severity = match req.severity.as_deref() {
        None => None,
        Some(raw) => Some(Severity::parse(raw).ok_or_else(|| {
            OpsError::invalid_field("severity", "severity must be one of low, medium, high")
        })?),
    };
    let status = match req.status.as_deref() {
        None => None,
        Some(raw) => Some(AlertStatus::parse(raw).ok_or_else(|| {
            OpsError::invalid_field("status", "status must be one of active, resolved")
        })?),
    };

    let updated = state
        .alerts()
        .update(
            id,
            UpdateAlert {
                name: req.name,
                condition: req.condition,
                severity,
                status,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(updated))
}

pub async fn toggle_alert(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Alert>> {
    authorize(caller.role, Capability::ManageAlerts)?;

    let id = parse_id(&id)?;
    let toggled = state.alerts().toggle_enabled(id).await?;
    Ok(Json(toggled))
}
