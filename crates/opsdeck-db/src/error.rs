//! Database-specific error types and conversions.

use opsdeck_core::error::OpsError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    Conflict { entity: String },

    #[error("Stored row could not be decoded: {0}")]
    Decode(String),
}

impl From<DbError> for OpsError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => OpsError::NotFound { entity, id },
            DbError::Conflict { entity } => OpsError::Conflict { entity },
            other => OpsError::Storage(other.to_string()),
        }
    }
}
