//! SurrealDB implementation of [`MetricRepository`].
//!
//! Metric rows are append-only; the only write path is `record`, used
//! by the external collector's ingest and by tests.

use chrono::{DateTime, Duration, Utc};
use opsdeck_core::error::OpsResult;
use opsdeck_core::models::metric::{MetricType, SystemMetric, SystemSnapshot};
use opsdeck_core::repository::MetricRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct MetricRow {
    metric_type: String,
    value: f64,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct MetricRowWithId {
    record_id: String,
    metric_type: String,
    value: f64,
    timestamp: DateTime<Utc>,
}

fn parse_metric_type(s: &str) -> Result<MetricType, DbError> {
    MetricType::parse(s).ok_or_else(|| DbError::Decode(format!("unknown metric type: {s}")))
}

impl MetricRow {
    fn into_metric(self, id: Uuid) -> Result<SystemMetric, DbError> {
        Ok(SystemMetric {
            id,
            metric_type: parse_metric_type(&self.metric_type)?,
            value: self.value,
            timestamp: self.timestamp,
        })
    }
}

impl MetricRowWithId {
    fn try_into_metric(self) -> Result<SystemMetric, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(SystemMetric {
            id,
            metric_type: parse_metric_type(&self.metric_type)?,
            value: self.value,
            timestamp: self.timestamp,
        })
    }
}

/// SurrealDB implementation of the Metric repository.
#[derive(Clone)]
pub struct SurrealMetricRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMetricRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Most recent reading for one metric type, or `None` when the
    /// table has no rows for it.
    async fn latest_for(&self, metric_type: MetricType) -> OpsResult<Option<SystemMetric>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM system_metric \
                 WHERE metric_type = $metric_type \
                 ORDER BY timestamp DESC LIMIT 1",
            )
            .bind(("metric_type", metric_type.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MetricRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_metric()?)),
            None => Ok(None),
        }
    }
}

impl<C: Connection> MetricRepository for SurrealMetricRepository<C> {
    async fn latest_snapshot(&self) -> OpsResult<SystemSnapshot> {
        Ok(SystemSnapshot {
            cpu: self.latest_for(MetricType::Cpu).await?,
            memory: self.latest_for(MetricType::Memory).await?,
            disk: self.latest_for(MetricType::Disk).await?,
        })
    }

    async fn history(
        &self,
        metric_type: MetricType,
        window_hours: u32,
    ) -> OpsResult<Vec<SystemMetric>> {
        let cutoff = Utc::now() - Duration::hours(i64::from(window_hours));

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM system_metric \
                 WHERE metric_type = $metric_type AND timestamp >= $cutoff \
                 ORDER BY timestamp ASC",
            )
            .bind(("metric_type", metric_type.as_str().to_string()))
            .bind(("cutoff", cutoff))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MetricRowWithId> = result.take(0).map_err(DbError::from)?;

        let metrics = rows
            .into_iter()
            .map(|row| row.try_into_metric())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(metrics)
    }

    async fn record(
        &self,
        metric_type: MetricType,
        value: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> OpsResult<SystemMetric> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let timestamp = timestamp.unwrap_or_else(Utc::now);

        let result = self
            .db
            .query(
                "CREATE type::record('system_metric', $id) SET \
                 metric_type = $metric_type, value = $value, \
                 timestamp = $timestamp",
            )
            .bind(("id", id_str.clone()))
            .bind(("metric_type", metric_type.as_str().to_string()))
            .bind(("value", value))
            .bind(("timestamp", timestamp))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<MetricRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "system_metric".into(),
            id: id_str,
        })?;

        Ok(row.into_metric(id)?)
    }
}
