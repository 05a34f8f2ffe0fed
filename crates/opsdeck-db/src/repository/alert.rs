//! SurrealDB implementation of [`AlertRepository`].

use chrono::{DateTime, Utc};
use opsdeck_core::error::OpsResult;
use opsdeck_core::models::alert::{Alert, AlertStatus, CreateAlert, Severity, UpdateAlert};
use opsdeck_core::repository::AlertRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AlertRow {
    name: String,
    condition: String,
    severity: String,
    enabled: bool,
    status: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct AlertRowWithId {
    record_id: String,
    name: String,
    condition: String,
    severity: String,
    enabled: bool,
    status: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_severity(s: &str) -> Result<Severity, DbError> {
    Severity::parse(s).ok_or_else(|| DbError::Decode(format!("unknown alert severity: {s}")))
}

fn parse_status(s: &str) -> Result<AlertStatus, DbError> {
    AlertStatus::parse(s).ok_or_else(|| DbError::Decode(format!("unknown alert status: {s}")))
}

impl AlertRow {
    fn into_alert(self, id: Uuid) -> Result<Alert, DbError> {
        Ok(Alert {
            id,
            name: self.name,
            condition: self.condition,
            severity: parse_severity(&self.severity)?,
            enabled: self.enabled,
            status: parse_status(&self.status)?,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl AlertRowWithId {
    fn try_into_alert(self) -> Result<Alert, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Alert {
            id,
            name: self.name,
            condition: self.condition,
            severity: parse_severity(&self.severity)?,
            enabled: self.enabled,
            status: parse_status(&self.status)?,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Alert repository.
#[derive(Clone)]
pub struct SurrealAlertRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAlertRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AlertRepository for SurrealAlertRepository<C> {
    async fn create(&self, input: CreateAlert) -> OpsResult<Alert> {
        input.validate()?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('alert', $id) SET \
                 name = $name, condition = $condition, \
                 severity = $severity, enabled = true, \
                 status = $status, description = $description",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("condition", input.condition))
            .bind(("severity", input.severity.as_str().to_string()))
            .bind(("status", AlertStatus::Active.as_str().to_string()))
            .bind(("description", input.description.unwrap_or_default()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<AlertRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "alert".into(),
            id: id_str,
        })?;

        Ok(row.into_alert(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> OpsResult<Alert> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('alert', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AlertRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "alert".into(),
            id: id_str,
        })?;

        Ok(row.into_alert(id)?)
    }

    async fn list(&self) -> OpsResult<Vec<Alert>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM alert \
                 ORDER BY created_at DESC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AlertRowWithId> = result.take(0).map_err(DbError::from)?;

        let alerts = rows
            .into_iter()
            .map(|row| row.try_into_alert())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(alerts)
    }

    async fn update(&self, id: Uuid, input: UpdateAlert) -> OpsResult<Alert> {
        input.validate()?;

        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.condition.is_some() {
            sets.push("condition = $condition");
        }
        if input.severity.is_some() {
            sets.push("severity = $severity");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('alert', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(condition) = input.condition {
            builder = builder.bind(("condition", condition));
        }
        if let Some(severity) = input.severity {
            builder = builder.bind(("severity", severity.as_str().to_string()));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<AlertRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "alert".into(),
            id: id_str,
        })?;

        Ok(row.into_alert(id)?)
    }

    async fn toggle_enabled(&self, id: Uuid) -> OpsResult<Alert> {
        let id_str = id.to_string();

        // Single-statement flip: only `enabled` (and the update stamp)
        // change, so concurrent edits to other fields are never
        // clobbered.
        let result = self
            .db
            .query(
                "UPDATE type::record('alert', $id) SET \
                 enabled = !enabled, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<AlertRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "alert".into(),
            id: id_str,
        })?;

        Ok(row.into_alert(id)?)
    }

    async fn count_active(&self) -> OpsResult<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM alert \
                 WHERE status = 'active' GROUP ALL",
            )
            .await
            .map_err(DbError::from)?;
        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
