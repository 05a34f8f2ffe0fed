//! Alert domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FieldError, OpsError, OpsResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Severity> {
        match s {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl AlertStatus {
    pub fn parse(s: &str) -> Option<AlertStatus> {
        match s {
            "active" => Some(AlertStatus::Active),
            "resolved" => Some(AlertStatus::Resolved),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub name: String,
    /// Condition expression, e.g. `cpu > 90`. Opaque to this service;
    /// evaluated by the external alerting engine.
    pub condition: String,
    pub severity: Severity,
    pub enabled: bool,
    pub status: AlertStatus,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateAlert {
    pub name: String,
    pub condition: String,
    pub severity: Severity,
    pub description: Option<String>,
}

impl CreateAlert {
    pub fn validate(&self) -> OpsResult<()> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "alert name is required"));
        }
        if self.condition.trim().is_empty() {
            errors.push(FieldError::new("condition", "alert condition is required"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(OpsError::Validation { errors })
        }
    }
}

/// Partial update for an alert. `enabled` is deliberately absent:
/// enable/disable is its own transition so concurrent updates cannot
/// clobber it.
#[derive(Debug, Clone, Default)]
pub struct UpdateAlert {
    pub name: Option<String>,
    pub condition: Option<String>,
    pub severity: Option<Severity>,
    pub status: Option<AlertStatus>,
    pub description: Option<String>,
}

impl UpdateAlert {
    pub fn validate(&self) -> OpsResult<()> {
        let mut errors = Vec::new();
        if matches!(&self.name, Some(n) if n.trim().is_empty()) {
            errors.push(FieldError::new("name", "alert name cannot be empty"));
        }
        if matches!(&self.condition, Some(c) if c.trim().is_empty()) {
            errors.push(FieldError::new("condition", "alert condition cannot be empty"));
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
    fn create_requires_name_and_condition() {
        let input = CreateAlert {
            name: String::new(),
            condition: String::new(),
            severity: Severity::High,
            description: None,
        };
        let err = input.validate().unwrap_err();
        match err {
            OpsError::Validation { errors } => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "condition"]);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn update_with_no_fields_is_valid() {
        assert!(UpdateAlert::default().validate().is_ok());
    }
}
