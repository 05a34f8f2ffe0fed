//! System metric domain model.
//!
//! Metric rows are written by an external collector; this core only
//! reads them (tests use the repository's `record` to seed data).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Cpu,
    Memory,
    Disk,
}

impl MetricType {
    pub const ALL: [MetricType; 3] = [MetricType::Cpu, MetricType::Memory, MetricType::Disk];

    pub fn parse(s: &str) -> Option<MetricType> {
        match s {
            "cpu" => Some(MetricType::Cpu),
            "memory" => Some(MetricType::Memory),
            "disk" => Some(MetricType::Disk),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Cpu => "cpu",
            MetricType::Memory => "memory",
            MetricType::Disk => "disk",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetric {
    pub id: Uuid,
    pub metric_type: MetricType,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Most recent reading per metric type. A type with no recorded rows
/// is `None` — callers must handle absence, never a zero default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub cpu: Option<SystemMetric>,
    pub memory: Option<SystemMetric>,
    pub disk: Option<SystemMetric>,
}
