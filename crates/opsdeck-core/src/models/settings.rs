//! System settings — a single upserted record, no history.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, OpsError, OpsResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemSettings {
    pub backup_enabled: bool,
    pub notification_enabled: bool,
    pub backup_frequency: String,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            backup_enabled: true,
            notification_enabled: true,
            backup_frequency: "daily".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateSystemSettings {
    pub backup_enabled: bool,
    pub notification_enabled: bool,
    /// Keeps the stored frequency when absent.
    pub backup_frequency: Option<String>,
}

impl UpdateSystemSettings {
    pub fn validate(&self) -> OpsResult<()> {
        if matches!(&self.backup_frequency, Some(f) if f.trim().is_empty()) {
            return Err(OpsError::Validation {
                errors: vec![FieldError::new(
                    "backup_frequency",
                    "backup_frequency cannot be empty",
                )],
            });
        }
        Ok(())
    }
}
