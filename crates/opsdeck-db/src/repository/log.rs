//! SurrealDB implementation of [`LogRepository`].
//!
//! The WHERE clause is assembled from fixed fragments only; every
//! caller-supplied value goes through a bind parameter.

use chrono::{DateTime, Utc};
use opsdeck_core::error::OpsResult;
use opsdeck_core::models::log::{AppendLog, LogLevel, LogQuery, SystemLog};
use opsdeck_core::repository::LogRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct LogRow {
    level: String,
    message: String,
    source: String,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct LogRowWithId {
    record_id: String,
    level: String,
    message: String,
    source: String,
    timestamp: DateTime<Utc>,
}

fn parse_level(s: &str) -> Result<LogLevel, DbError> {
    LogLevel::parse(s).ok_or_else(|| DbError::Decode(format!("unknown log level: {s}")))
}

impl LogRow {
    fn into_log(self, id: Uuid) -> Result<SystemLog, DbError> {
        Ok(SystemLog {
            id,
            level: parse_level(&self.level)?,
            message: self.message,
            source: self.source,
            timestamp: self.timestamp,
        })
    }
}

impl LogRowWithId {
    fn try_into_log(self) -> Result<SystemLog, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(SystemLog {
            id,
            level: parse_level(&self.level)?,
            message: self.message,
            source: self.source,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Log repository.
#[derive(Clone)]
pub struct SurrealLogRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealLogRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> LogRepository for SurrealLogRepository<C> {
    async fn append(&self, input: AppendLog) -> OpsResult<SystemLog> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let timestamp = input.timestamp.unwrap_or_else(Utc::now);

        let result = self
            .db
            .query(
                "CREATE type::record('system_log', $id) SET \
                 level = $level, message = $message, \
                 source = $source, timestamp = $timestamp",
            )
            .bind(("id", id_str.clone()))
            .bind(("level", input.level.as_str().to_string()))
            .bind(("message", input.message))
            .bind(("source", input.source))
            .bind(("timestamp", timestamp))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<LogRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "system_log".into(),
            id: id_str,
        })?;

        Ok(row.into_log(id)?)
    }

    async fn query(&self, query: LogQuery) -> OpsResult<Vec<SystemLog>> {
        query.validate()?;

        let mut clauses = Vec::new();
        if query.level.is_some() {
            clauses.push("level = $level");
        }
        if query.start_date.is_some() && query.end_date.is_some() {
            clauses.push("timestamp >= $start_date AND timestamp <= $end_date");
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT meta::id(id) AS record_id, * FROM system_log \
             {where_clause}ORDER BY timestamp DESC LIMIT $limit"
        );

        let mut builder = self.db.query(&sql).bind(("limit", i64::from(query.limit)));
        if let Some(level) = query.level {
            builder = builder.bind(("level", level.as_str().to_string()));
        }
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            builder = builder.bind(("start_date", start)).bind(("end_date", end));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<LogRowWithId> = result.take(0).map_err(DbError::from)?;

        let logs = rows
            .into_iter()
            .map(|row| row.try_into_log())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(logs)
    }

    async fn count_errors_since(&self, cutoff: DateTime<Utc>) -> OpsResult<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM system_log \
                 WHERE level = 'error' AND timestamp >= $cutoff GROUP ALL",
            )
            .bind(("cutoff", cutoff))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
