//! Error types for the OpsDeck system.

use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure.
///
/// Collected into `OpsError::Validation` and serialized verbatim into
/// the error response body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("validation failed")]
    Validation { errors: Vec<FieldError> },

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("conflict: {entity} already exists")]
    Conflict { entity: String },

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl OpsError {
    /// Shorthand for a single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        OpsError::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

pub type OpsResult<T> = Result<T, OpsError>;
