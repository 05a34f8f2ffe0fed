//! Authentication and authorization error types.

use opsdeck_core::error::OpsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username and wrong password collapse into this one
    /// variant so callers cannot enumerate accounts.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is inactive")]
    AccountInactive,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("role lacks capability: {capability}")]
    Forbidden { capability: &'static str },

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for OpsError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::AccountInactive => OpsError::Unauthorized {
                reason: err.to_string(),
            },
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => OpsError::Unauthorized {
                reason: err.to_string(),
            },
            AuthError::Forbidden { capability } => OpsError::Forbidden {
                reason: format!("role lacks capability: {capability}"),
            },
            AuthError::Crypto(msg) => OpsError::Internal(msg),
        }
    }
}
