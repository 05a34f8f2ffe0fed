//! Shared application state.
//!
//! Built once at startup and passed to every handler through axum's
//! `State` — the process-wide context object the design calls for
//! instead of ambient globals. Repositories are thin wrappers over the
//! shared connection handle and are constructed per call.

use opsdeck_auth::AuthConfig;
use opsdeck_auth::service::AuthService;
use opsdeck_db::repository::{
    SurrealAlertRepository, SurrealBackupRepository, SurrealLogRepository,
    SurrealMetricRepository, SurrealNotificationSettingsRepository,
    SurrealSystemSettingsRepository, SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

#[derive(Clone)]
pub struct AppState {
    db: Surreal<Any>,
    auth: AuthConfig,
}

impl AppState {
    pub fn new(db: Surreal<Any>, auth: AuthConfig) -> Self {
        Self { db, auth }
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth
    }

    pub fn auth_service(&self) -> AuthService<SurrealUserRepository<Any>> {
        AuthService::new(self.users(), self.auth.clone())
    }

    pub fn users(&self) -> SurrealUserRepository<Any> {
        match &self.auth.pepper {
            Some(pepper) => SurrealUserRepository::with_pepper(self.db.clone(), pepper.clone()),
            None => SurrealUserRepository::new(self.db.clone()),
        }
    }

    pub fn alerts(&self) -> SurrealAlertRepository<Any> {
        SurrealAlertRepository::new(self.db.clone())
    }

    pub fn metrics(&self) -> SurrealMetricRepository<Any> {
        SurrealMetricRepository::new(self.db.clone())
    }

    pub fn logs(&self) -> SurrealLogRepository<Any> {
        SurrealLogRepository::new(self.db.clone())
    }

    pub fn backups(&self) -> SurrealBackupRepository<Any> {
        SurrealBackupRepository::new(self.db.clone())
    }

    pub fn system_settings(&self) -> SurrealSystemSettingsRepository<Any> {
        SurrealSystemSettingsRepository::new(self.db.clone())
    }

    pub fn notification_settings(&self) -> SurrealNotificationSettingsRepository<Any> {
        SurrealNotificationSettingsRepository::new(self.db.clone())
    }
}
