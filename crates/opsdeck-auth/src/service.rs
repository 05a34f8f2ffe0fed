//! Authentication service — credential verification and token
//! issuance.

use opsdeck_core::error::{OpsError, OpsResult};
use opsdeck_core::models::user::{Role, UserStatus};
use opsdeck_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed session token.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    pub user_id: Uuid,
    pub role: Role,
}

/// Authentication service.
///
/// Generic over the user repository so the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    /// Authenticate a user with username + password and issue a token.
    ///
    /// An unknown username and a wrong password produce the same
    /// error, so the response never reveals which one was wrong.
    pub async fn login(&self, input: LoginInput) -> OpsResult<LoginOutput> {
        // 1. Look up user by exact username.
        let user = match self.user_repo.get_by_username(&input.username).await {
            Ok(u) => u,
            Err(OpsError::NotFound { .. }) => return Err(AuthError::InvalidCredentials.into()),
            Err(e) => return Err(e),
        };

        // 2. Verify password.
        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Check account status.
        if user.status == UserStatus::Inactive {
            return Err(AuthError::AccountInactive.into());
        }

        // 4. Issue token.
        let token = token::issue_token(user.id, user.role, &self.config)?;

        Ok(LoginOutput {
            token,
            expires_in: self.config.token_lifetime_secs,
            user_id: user.id,
            role: user.role,
        })
    }
}
