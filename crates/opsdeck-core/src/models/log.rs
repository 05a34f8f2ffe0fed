//! System log domain model and query filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FieldError, OpsError, OpsResult};

/// Default number of log rows returned when no limit is given.
pub const DEFAULT_LOG_LIMIT: u32 = 100;
/// Hard ceiling on a single log query, to prevent unbounded scans.
pub const MAX_LOG_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<LogLevel> {
        match s {
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemLog {
    pub id: Uuid,
    pub level: LogLevel,
    pub message: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

/// Input for appending a log row. Only external writers and tests use
/// this; the HTTP surface never writes logs.
#[derive(Debug, Clone)]
pub struct AppendLog {
    pub level: LogLevel,
    pub message: String,
    pub source: String,
    /// Defaults to now when absent.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Filter for querying log rows, ordered timestamp-descending.
#[derive(Debug, Clone)]
pub struct LogQuery {
    pub level: Option<LogLevel>,
    /// Inclusive range start; must be paired with `end_date`.
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive range end; must be paired with `start_date`.
    pub end_date: Option<DateTime<Utc>>,
    pub limit: u32,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            level: None,
            start_date: None,
            end_date: None,
            limit: DEFAULT_LOG_LIMIT,
        }
    }
}

impl LogQuery {
    pub fn validate(&self) -> OpsResult<()> {
        let mut errors = Vec::new();
        match (self.start_date, self.end_date) {
            (Some(_), None) => {
                errors.push(FieldError::new(
                    "endDate",
                    "endDate is required when startDate is given",
                ));
            }
            (None, Some(_)) => {
                errors.push(FieldError::new(
                    "startDate",
                    "startDate is required when endDate is given",
                ));
            }
            _ => {}
        }
        if self.limit == 0 || self.limit > MAX_LOG_LIMIT {
            errors.push(FieldError::new(
                "limit",
                format!("limit must be between 1 and {MAX_LOG_LIMIT}"),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(OpsError::Validation { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_is_valid() {
        assert!(LogQuery::default().validate().is_ok());
    }

    #[test]
    fn half_open_date_range_is_rejected() {
        let query = LogQuery {
            start_date: Some(Utc::now()),
            ..Default::default()
        };
        let err = query.validate().unwrap_err();
        match err {
            OpsError::Validation { errors } => assert_eq!(errors[0].field, "endDate"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn limit_bounds_are_enforced() {
        for limit in [0, MAX_LOG_LIMIT + 1] {
            let query = LogQuery {
                limit,
                ..Default::default()
            };
            assert!(query.validate().is_err(), "limit {limit} should be rejected");
        }
        let query = LogQuery {
            limit: MAX_LOG_LIMIT,
            ..Default::default()
        };
        assert!(query.validate().is_ok());
    }
}
