//! Backup endpoints.
//!
//! Scheduling records a `pending` row and returns immediately; the
//! actual backup run belongs to the external worker.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use opsdeck_auth::{Capability, authorize};
use opsdeck_core::models::backup::{Backup, CreateBackup};
use opsdeck_core::repository::BackupRepository;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

pub async fn list_backups(
    State(state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<Vec<Backup>>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let backups = state.backups().list().await?;
    Ok(Json(backups))
}

#[derive(Debug, Deserialize)]
pub struct CreateBackupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn create_backup(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateBackupRequest>,
) -> ApiResult<(StatusCode, Json<Backup>)> {
    authorize(caller.role, Capability::ViewConsole)?;

    let created = state
        .backups()
        .create(CreateBackup {
            name: req.name.unwrap_or_default(),
            description: req.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}
