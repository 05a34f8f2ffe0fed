//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Each resource manager owns
//! validation and mutation of its entity; implementations must never
//! interpolate caller input into query text.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::OpsResult;
use crate::models::{
    alert::{Alert, CreateAlert, UpdateAlert},
    backup::{Backup, BackupStatus, CreateBackup},
    log::{AppendLog, LogQuery, SystemLog},
    metric::{MetricType, SystemMetric, SystemSnapshot},
    notification::{NotificationSettings, UpdateNotificationSettings},
    settings::{SystemSettings, UpdateSystemSettings},
    user::{CreateUser, User, UserStatus},
};

pub trait UserRepository: Send + Sync {
    /// Create a user. Fails with `Conflict` when the username or email
    /// is already taken; performs no write in that case.
    fn create(&self, input: CreateUser) -> impl Future<Output = OpsResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OpsResult<User>> + Send;
    fn get_by_username(&self, username: &str) -> impl Future<Output = OpsResult<User>> + Send;
    fn list(&self) -> impl Future<Output = OpsResult<Vec<User>>> + Send;
    /// Soft enable/disable — users are never hard-deleted.
    fn set_status(
        &self,
        id: Uuid,
        status: UserStatus,
    ) -> impl Future<Output = OpsResult<User>> + Send;
    fn count_active(&self) -> impl Future<Output = OpsResult<u64>> + Send;
    fn count(&self) -> impl Future<Output = OpsResult<u64>> + Send;
}

pub trait AlertRepository: Send + Sync {
    fn create(&self, input: CreateAlert) -> impl Future<Output = OpsResult<Alert>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OpsResult<Alert>> + Send;
    /// Newest first.
    fn list(&self) -> impl Future<Output = OpsResult<Vec<Alert>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateAlert,
    ) -> impl Future<Output = OpsResult<Alert>> + Send;
    /// Flip `enabled` and nothing else.
    fn toggle_enabled(&self, id: Uuid) -> impl Future<Output = OpsResult<Alert>> + Send;
    fn count_active(&self) -> impl Future<Output = OpsResult<u64>> + Send;
}

pub trait MetricRepository: Send + Sync {
    /// Latest reading per metric type; `None` for a type with no rows.
    fn latest_snapshot(&self) -> impl Future<Output = OpsResult<SystemSnapshot>> + Send;
    /// Rows for `metric_type` within the trailing `window_hours`,
    /// ascending by timestamp. The caller validates `window_hours`.
    fn history(
        &self,
        metric_type: MetricType,
        window_hours: u32,
    ) -> impl Future<Output = OpsResult<Vec<SystemMetric>>> + Send;
    /// Append-only ingest path for the external collector and tests.
    fn record(
        &self,
        metric_type: MetricType,
        value: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> impl Future<Output = OpsResult<SystemMetric>> + Send;
}

pub trait LogRepository: Send + Sync {
    /// Append a log row. No update or delete operations exist.
    fn append(&self, input: AppendLog) -> impl Future<Output = OpsResult<SystemLog>> + Send;
    /// Filtered query, newest first, bounded by `query.limit`.
    fn query(&self, query: LogQuery) -> impl Future<Output = OpsResult<Vec<SystemLog>>> + Send;
    fn count_errors_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = OpsResult<u64>> + Send;
}

pub trait BackupRepository: Send + Sync {
    /// Insert with status `pending`; completion is the external
    /// worker's responsibility.
    fn create(&self, input: CreateBackup) -> impl Future<Output = OpsResult<Backup>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OpsResult<Backup>> + Send;
    /// Newest first.
    fn list(&self) -> impl Future<Output = OpsResult<Vec<Backup>>> + Send;
    /// Move a backup through its state machine; illegal transitions
    /// fail with `Validation` and write nothing.
    fn transition(
        &self,
        id: Uuid,
        next: BackupStatus,
    ) -> impl Future<Output = OpsResult<Backup>> + Send;
    fn count_completed_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = OpsResult<u64>> + Send;
}

pub trait SystemSettingsRepository: Send + Sync {
    /// Returns defaults when the singleton has not been written yet.
    fn get(&self) -> impl Future<Output = OpsResult<SystemSettings>> + Send;
    fn update(
        &self,
        input: UpdateSystemSettings,
    ) -> impl Future<Output = OpsResult<SystemSettings>> + Send;
}

pub trait NotificationSettingsRepository: Send + Sync {
    /// Returns all-channels-disabled defaults when the user has no row.
    fn get_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = OpsResult<NotificationSettings>> + Send;
    fn upsert(
        &self,
        user_id: Uuid,
        input: UpdateNotificationSettings,
    ) -> impl Future<Output = OpsResult<NotificationSettings>> + Send;
}
