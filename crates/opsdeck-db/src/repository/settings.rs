//! SurrealDB implementation of [`SystemSettingsRepository`].
//!
//! System settings live in a single record with the fixed id
//! `global`; updates are upserts and keep no history.

use chrono::{DateTime, Utc};
use opsdeck_core::error::OpsResult;
use opsdeck_core::models::settings::{SystemSettings, UpdateSystemSettings};
use opsdeck_core::repository::SystemSettingsRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

const SETTINGS_RECORD_ID: &str = "global";

#[derive(Debug, SurrealValue)]
struct SettingsRow {
    backup_enabled: bool,
    notification_enabled: bool,
    backup_frequency: String,
    #[allow(dead_code)]
    updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for SystemSettings {
    fn from(row: SettingsRow) -> Self {
        Self {
            backup_enabled: row.backup_enabled,
            notification_enabled: row.notification_enabled,
            backup_frequency: row.backup_frequency,
        }
    }
}

/// SurrealDB implementation of the SystemSettings repository.
#[derive(Clone)]
pub struct SurrealSystemSettingsRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSystemSettingsRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SystemSettingsRepository for SurrealSystemSettingsRepository<C> {
    async fn get(&self) -> OpsResult<SystemSettings> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('system_settings', $id)")
            .bind(("id", SETTINGS_RECORD_ID.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SettingsRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .next()
            .map(SystemSettings::from)
            .unwrap_or_default())
    }

    async fn update(&self, input: UpdateSystemSettings) -> OpsResult<SystemSettings> {
        input.validate()?;

        // Absent frequency keeps whatever is stored (or the default).
        let backup_frequency = match input.backup_frequency {
            Some(f) => f,
            None => self.get().await?.backup_frequency,
        };

        let result = self
            .db
            .query(
                "UPSERT type::record('system_settings', $id) SET \
                 backup_enabled = $backup_enabled, \
                 notification_enabled = $notification_enabled, \
                 backup_frequency = $backup_frequency, \
                 updated_at = time::now()",
            )
            .bind(("id", SETTINGS_RECORD_ID.to_string()))
            .bind(("backup_enabled", input.backup_enabled))
            .bind(("notification_enabled", input.notification_enabled))
            .bind(("backup_frequency", backup_frequency))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<SettingsRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "system_settings".into(),
            id: SETTINGS_RECORD_ID.into(),
        })?;

        Ok(row.into())
    }
}
