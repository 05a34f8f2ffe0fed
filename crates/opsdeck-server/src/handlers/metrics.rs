//! Metrics endpoints: latest snapshot and windowed history.

use axum::Json;
use axum::extract::{Query, State};
use opsdeck_auth::{Capability, authorize};
use opsdeck_core::error::{FieldError, OpsError};
use opsdeck_core::models::metric::{MetricType, SystemMetric, SystemSnapshot};
use opsdeck_core::repository::MetricRepository;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

pub async fn system_snapshot(
    State(state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<SystemSnapshot>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let snapshot = state.metrics().latest_snapshot().await?;
    Ok(Json(snapshot))
}

/// Raw query parameters; parsed by hand so failures surface in the
/// structured validation shape.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(rename = "type")]
    pub metric_type: Option<String>,
    pub hours: Option<String>,
}

pub async fn history(
    State(state): State<AppState>,
    caller: AuthUser,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<SystemMetric>>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let mut errors = Vec::new();

    let metric_type = match params.metric_type.as_deref() {
        Some(raw) => {
            let parsed = MetricType::parse(raw);
            if parsed.is_none() {
                errors.push(FieldError::new(
                    "type",
                    "type must be one of cpu, memory, disk",
                ));
            }
            parsed
        }
        None => {
            errors.push(FieldError::new("type", "type is required"));
            None
        }
    };

    // Defaults to a 24-hour window; must be a positive integer.
    let window_hours = match params.hours.as_deref() {
        None => Some(24),
        Some(raw) => match raw.parse::<u32>() {
            Ok(h) if h > 0 => Some(h),
            _ => {
                errors.push(FieldError::new("hours", "hours must be a positive integer"));
                None
            }
        },
    };

    let (Some(metric_type), Some(window_hours)) = (metric_type, window_hours) else {
        return Err(OpsError::Validation { errors }.into());
    };

    let metrics = state.metrics().history(metric_type, window_hours).await?;
    Ok(Json(metrics))
}
