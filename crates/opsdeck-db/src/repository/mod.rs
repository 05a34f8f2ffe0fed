//! SurrealDB repository implementations.

mod alert;
mod backup;
mod log;
mod metric;
mod notification;
mod settings;
mod user;

pub use alert::SurrealAlertRepository;
pub use backup::SurrealBackupRepository;
pub use log::SurrealLogRepository;
pub use metric::SurrealMetricRepository;
pub use notification::SurrealNotificationSettingsRepository;
pub use settings::SurrealSystemSettingsRepository;
pub use user::SurrealUserRepository;
