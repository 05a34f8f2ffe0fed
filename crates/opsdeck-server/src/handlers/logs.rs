//! Log query endpoint.

use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use opsdeck_auth::{Capability, authorize};
use opsdeck_core::error::{FieldError, OpsError};
use opsdeck_core::models::log::{DEFAULT_LOG_LIMIT, LogLevel, LogQuery, SystemLog};
use opsdeck_core::repository::LogRepository;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LogParams {
    pub level: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub limit: Option<String>,
}

fn parse_date(raw: &str, field: &str, errors: &mut Vec<FieldError>) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                format!("{field} must be an RFC 3339 timestamp"),
            ));
            None
        }
    }
}

pub async fn query_logs(
    State(state): State<AppState>,
    caller: AuthUser,
    Query(params): Query<LogParams>,
) -> ApiResult<Json<Vec<SystemLog>>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let mut errors = Vec::new();

    let level = match params.level.as_deref() {
        None => None,
        Some(raw) => {
            let parsed = LogLevel::parse(raw);
            if parsed.is_none() {
                errors.push(FieldError::new(
                    "level",
                    "level must be one of error, warn, info, debug",
                ));
            }
            parsed
        }
    };

    let start_date = params
        .start_date
        .as_deref()
        .and_then(|raw| parse_date(raw, "startDate", &mut errors));
    let end_date = params
        .end_date
        .as_deref()
        .and_then(|raw| parse_date(raw, "endDate", &mut errors));

    let limit = match params.limit.as_deref() {
        None => DEFAULT_LOG_LIMIT,
        Some(raw) => match raw.parse::<u32>() {
            Ok(l) => l,
            Err(_) => {
                errors.push(FieldError::new("limit", "limit must be a positive integer"));
                DEFAULT_LOG_LIMIT
            }
        },
    };

    if !errors.is_empty() {
        return Err(OpsError::Validation { errors }.into());
    }

    // Range pairing and the limit ceiling are enforced by the query's
    // own validation inside the repository.
    let logs = state
        .logs()
        .query(LogQuery {
            level,
            start_date,
            end_date,
            limit,
        })
        .await?;

    Ok(Json(logs))
}
