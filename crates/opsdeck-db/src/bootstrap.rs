//! Idempotent startup bootstrap.
//!
//! Ensures the baseline accounts and the settings singleton exist so a
//! fresh deployment is immediately usable. The guard is a
//! check-then-insert, not a serialized migration step; single-instance
//! startup is assumed.

use opsdeck_core::error::OpsResult;
use opsdeck_core::models::settings::{SystemSettings, UpdateSystemSettings};
use opsdeck_core::models::user::{CreateUser, Role};
use opsdeck_core::repository::{SystemSettingsRepository, UserRepository};
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::repository::{SurrealSystemSettingsRepository, SurrealUserRepository};

/// Seed accounts and hashing pepper for a cold start.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password: String,
    pub user_username: String,
    pub user_email: String,
    pub user_password: String,
    pub pepper: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".into(),
            admin_email: "admin@opsdeck.local".into(),
            admin_password: "admin123".into(),
            user_username: "user".into(),
            user_email: "user@opsdeck.local".into(),
            user_password: "user123".into(),
            pepper: None,
        }
    }
}

/// Seed the baseline admin and standard user when the user table is
/// empty, and make sure the system-settings singleton exists. Safe to
/// re-run: a populated table is left untouched.
pub async fn run_bootstrap<C: Connection>(
    db: &Surreal<C>,
    config: &BootstrapConfig,
) -> OpsResult<()> {
    let users = match &config.pepper {
        Some(pepper) => SurrealUserRepository::with_pepper(db.clone(), pepper.clone()),
        None => SurrealUserRepository::new(db.clone()),
    };

    if users.count().await? == 0 {
        users
            .create(CreateUser {
                username: config.admin_username.clone(),
                email: config.admin_email.clone(),
                password: config.admin_password.clone(),
                role: Role::Admin,
            })
            .await?;
        users
            .create(CreateUser {
                username: config.user_username.clone(),
                email: config.user_email.clone(),
                password: config.user_password.clone(),
                role: Role::User,
            })
            .await?;

        // First boot: write the settings singleton so later reads and
        // updates operate on a real record. Never re-written after
        // that, so admin changes survive restarts.
        let settings = SurrealSystemSettingsRepository::new(db.clone());
        let defaults = SystemSettings::default();
        settings
            .update(UpdateSystemSettings {
                backup_enabled: defaults.backup_enabled,
                notification_enabled: defaults.notification_enabled,
                backup_frequency: Some(defaults.backup_frequency),
            })
            .await?;

        info!("Seeded baseline accounts and default settings");
    }

    Ok(())
}
