//! Health endpoints.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Duration, Utc};
use opsdeck_auth::{Capability, authorize};
use opsdeck_core::repository::{
    AlertRepository, BackupRepository, LogRepository, UserRepository,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Liveness probe — no authentication, no storage access.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub active_users: u64,
    pub active_alerts: u64,
    /// Backups completed in the trailing 24 hours.
    pub recent_backups: u64,
    /// Error-level log rows in the trailing 24 hours.
    pub recent_errors: u64,
}

pub async fn health_detailed(
    State(state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<DetailedHealthResponse>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let cutoff = Utc::now() - Duration::hours(24);

    Ok(Json(DetailedHealthResponse {
        active_users: state.users().count_active().await?,
        active_alerts: state.alerts().count_active().await?,
        recent_backups: state.backups().count_completed_since(cutoff).await?,
        recent_errors: state.logs().count_errors_since(cutoff).await?,
    }))
}
