//! Error-to-response mapping.
//!
//! Every failure leaving the HTTP surface is a structured JSON body
//! `{"message", "errors"?}`. Storage and internal errors are logged
//! and blanked to a generic 500 so backend details never reach
//! clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use opsdeck_auth::AuthError;
use opsdeck_core::error::{FieldError, OpsError};
use serde::Serialize;
use tracing::error;

/// Wrapper implementing `IntoResponse` for the core error taxonomy.
#[derive(Debug)]
pub struct ApiError(pub OpsError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<OpsError> for ApiError {
    fn from(err: OpsError) -> Self {
        ApiError(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError(err.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self.0 {
            OpsError::Validation { errors } => (
                StatusCode::BAD_REQUEST,
                "validation failed".to_string(),
                Some(errors),
            ),
            OpsError::Unauthorized { reason } => (StatusCode::UNAUTHORIZED, reason, None),
            OpsError::Forbidden { reason } => (StatusCode::FORBIDDEN, reason, None),
            OpsError::Conflict { entity } => (
                StatusCode::CONFLICT,
                format!("{entity} already exists"),
                None,
            ),
            OpsError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                format!("{entity} not found: {id}"),
                None,
            ),
            OpsError::Storage(detail) => {
                error!(%detail, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string(), None)
            }
            OpsError::Internal(detail) => {
                error!(%detail, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string(), None)
            }
        };

        (status, Json(ErrorBody { message, errors })).into_response()
    }
}
