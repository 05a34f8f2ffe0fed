//! SurrealDB implementation of [`BackupRepository`].
//!
//! Scheduling inserts a `pending` row and returns immediately; the
//! external backup worker drives the record through `transition`,
//! which enforces the status state machine before writing.

use chrono::{DateTime, Utc};
use opsdeck_core::error::{OpsError, OpsResult};
use opsdeck_core::models::backup::{Backup, BackupStatus, CreateBackup};
use opsdeck_core::repository::BackupRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct BackupRow {
    name: String,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, SurrealValue)]
struct BackupRowWithId {
    record_id: String,
    name: String,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

fn parse_status(s: &str) -> Result<BackupStatus, DbError> {
    BackupStatus::parse(s).ok_or_else(|| DbError::Decode(format!("unknown backup status: {s}")))
}

impl BackupRow {
    fn into_backup(self, id: Uuid) -> Result<Backup, DbError> {
        Ok(Backup {
            id,
            name: self.name,
            description: self.description,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            completed_at: self.completed_at,
        })
    }
}

impl BackupRowWithId {
    fn try_into_backup(self) -> Result<Backup, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Backup {
            id,
            name: self.name,
            description: self.description,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            completed_at: self.completed_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Backup repository.
#[derive(Clone)]
pub struct SurrealBackupRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBackupRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> BackupRepository for SurrealBackupRepository<C> {
    async fn create(&self, input: CreateBackup) -> OpsResult<Backup> {
        input.validate()?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('backup', $id) SET \
                 name = $name, description = $description, \
                 status = $status, completed_at = NONE",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("description", input.description.unwrap_or_default()))
            .bind(("status", BackupStatus::Pending.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<BackupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "backup".into(),
            id: id_str,
        })?;

        Ok(row.into_backup(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> OpsResult<Backup> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('backup', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BackupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "backup".into(),
            id: id_str,
        })?;

        Ok(row.into_backup(id)?)
    }

    async fn list(&self) -> OpsResult<Vec<Backup>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM backup \
                 ORDER BY created_at DESC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BackupRowWithId> = result.take(0).map_err(DbError::from)?;

        let backups = rows
            .into_iter()
            .map(|row| row.try_into_backup())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(backups)
    }

    async fn transition(&self, id: Uuid, next: BackupStatus) -> OpsResult<Backup> {
        let current = self.get_by_id(id).await?;

        if !current.status.can_transition_to(next) {
            return Err(OpsError::invalid_field(
                "status",
                format!(
                    "illegal backup transition: {} -> {}",
                    current.status.as_str(),
                    next.as_str()
                ),
            ));
        }

        // A completed backup gets its completion stamp; a retried one
        // (failed -> pending) loses it.
        let completed_at = match next {
            BackupStatus::Completed => Some(Utc::now()),
            _ => None,
        };

        let id_str = id.to_string();
        let result = self
            .db
            .query(
                "UPDATE type::record('backup', $id) SET \
                 status = $status, completed_at = $completed_at",
            )
            .bind(("id", id_str.clone()))
            .bind(("status", next.as_str().to_string()))
            .bind(("completed_at", completed_at))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<BackupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "backup".into(),
            id: id_str,
        })?;

        Ok(row.into_backup(id)?)
    }

    async fn count_completed_since(&self, cutoff: DateTime<Utc>) -> OpsResult<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM backup \
                 WHERE status = 'completed' AND created_at >= $cutoff GROUP ALL",
            )
            .bind(("cutoff", cutoff))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
