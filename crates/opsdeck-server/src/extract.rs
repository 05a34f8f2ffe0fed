//! Request extractors: authenticated caller context and strict JSON
//! bodies.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use opsdeck_auth::token;
use opsdeck_core::error::OpsError;
use opsdeck_core::models::user::Role;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, proven by a validated bearer token.
///
/// Extraction fails with 401 before the handler body runs, so no
/// resource manager ever executes against an unauthenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError(OpsError::Unauthorized {
                    reason: "missing bearer token".into(),
                })
            })?;

        let claims = token::validate_token(token, state.auth_config())?;
        let id = claims.0.user_id()?;

        Ok(AuthUser {
            id,
            role: claims.0.role,
        })
    }
}

/// JSON body extractor that converts axum's rejection into the
/// structured error contract instead of a plain-text 400.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError(body_error(rejection))),
        }
    }
}

fn body_error(rejection: JsonRejection) -> OpsError {
    OpsError::invalid_field("body", rejection.body_text())
}

/// Parse a path segment as a record id, failing with the structured
/// validation shape rather than axum's default rejection.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError(OpsError::invalid_field("id", "id must be a valid UUID")))
}
