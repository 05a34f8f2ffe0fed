//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as lowercase strings
//! with ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD username ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['admin', 'manager', 'user'];
DEFINE FIELD status ON TABLE user TYPE string \
    ASSERT $value IN ['active', 'inactive'];
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_username ON TABLE user COLUMNS username UNIQUE;
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Alerts
-- =======================================================================
DEFINE TABLE alert SCHEMAFULL;
DEFINE FIELD name ON TABLE alert TYPE string;
DEFINE FIELD condition ON TABLE alert TYPE string;
DEFINE FIELD severity ON TABLE alert TYPE string \
    ASSERT $value IN ['low', 'medium', 'high'];
DEFINE FIELD enabled ON TABLE alert TYPE bool DEFAULT true;
DEFINE FIELD status ON TABLE alert TYPE string \
    ASSERT $value IN ['active', 'resolved'];
DEFINE FIELD description ON TABLE alert TYPE string DEFAULT '';
DEFINE FIELD created_at ON TABLE alert TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE alert TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_alert_created ON TABLE alert COLUMNS created_at;

-- =======================================================================
-- System metrics (append-only, written by the external collector)
-- =======================================================================
DEFINE TABLE system_metric SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD metric_type ON TABLE system_metric TYPE string \
    ASSERT $value IN ['cpu', 'memory', 'disk'];
DEFINE FIELD value ON TABLE system_metric TYPE float;
DEFINE FIELD timestamp ON TABLE system_metric TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_metric_type_time ON TABLE system_metric \
    COLUMNS metric_type, timestamp;

-- =======================================================================
-- System logs (append-only, written externally)
-- =======================================================================
DEFINE TABLE system_log SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD level ON TABLE system_log TYPE string \
    ASSERT $value IN ['error', 'warn', 'info', 'debug'];
DEFINE FIELD message ON TABLE system_log TYPE string;
DEFINE FIELD source ON TABLE system_log TYPE string;
DEFINE FIELD timestamp ON TABLE system_log TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_log_time ON TABLE system_log COLUMNS timestamp;
DEFINE INDEX idx_log_level_time ON TABLE system_log \
    COLUMNS level, timestamp;

-- =======================================================================
-- Backups
-- =======================================================================
DEFINE TABLE backup SCHEMAFULL;
DEFINE FIELD name ON TABLE backup TYPE string;
DEFINE FIELD description ON TABLE backup TYPE string DEFAULT '';
DEFINE FIELD status ON TABLE backup TYPE string \
    ASSERT $value IN ['pending', 'in_progress', 'completed', 'failed'];
DEFINE FIELD created_at ON TABLE backup TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD completed_at ON TABLE backup TYPE option<datetime>;
DEFINE INDEX idx_backup_created ON TABLE backup COLUMNS created_at;

-- =======================================================================
-- System settings (singleton record, id 'global')
-- =======================================================================
DEFINE TABLE system_settings SCHEMAFULL;
DEFINE FIELD backup_enabled ON TABLE system_settings TYPE bool;
DEFINE FIELD notification_enabled ON TABLE system_settings TYPE bool;
DEFINE FIELD backup_frequency ON TABLE system_settings TYPE string;
DEFINE FIELD updated_at ON TABLE system_settings TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Notification settings (record id = owner's user id)
-- =======================================================================
DEFINE TABLE notification_settings SCHEMAFULL;
DEFINE FIELD email_enabled ON TABLE notification_settings TYPE bool \
    DEFAULT false;
DEFINE FIELD slack_enabled ON TABLE notification_settings TYPE bool \
    DEFAULT false;
DEFINE FIELD webhook_enabled ON TABLE notification_settings TYPE bool \
    DEFAULT false;
DEFINE FIELD email ON TABLE notification_settings TYPE option<string>;
DEFINE FIELD slack_webhook ON TABLE notification_settings \
    TYPE option<string>;
DEFINE FIELD webhook_url ON TABLE notification_settings \
    TYPE option<string>;
DEFINE FIELD updated_at ON TABLE notification_settings TYPE datetime \
    DEFAULT time::now();
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn schema_v1_defines_every_table() {
        for table in [
            "user",
            "alert",
            "system_metric",
            "system_log",
            "backup",
            "system_settings",
            "notification_settings",
        ] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table definition: {table}"
            );
        }
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
