//! Environment-driven server configuration.
//!
//! Assembled once in `main` and handed to the components that need it.

use std::env;

use opsdeck_auth::AuthConfig;
use opsdeck_db::{BootstrapConfig, DbConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub bootstrap: BootstrapConfig,
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    /// Build the configuration from the process environment.
    ///
    /// Only the JWT secret is mandatory — everything else has a
    /// development-friendly default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("OPSDECK_JWT_SECRET")
            .map_err(|_| ConfigError::MissingVar("OPSDECK_JWT_SECRET"))?;

        let pepper = env::var("OPSDECK_PASSWORD_PEPPER").ok();

        let auth = AuthConfig {
            jwt_secret,
            token_lifetime_secs: env_u64("OPSDECK_TOKEN_LIFETIME_SECS", 86_400),
            jwt_issuer: env_string("OPSDECK_JWT_ISSUER", "opsdeck"),
            pepper: pepper.clone(),
        };

        let db = DbConfig {
            url: env_string("OPSDECK_DB_URL", "ws://127.0.0.1:8000"),
            namespace: env_string("OPSDECK_DB_NAMESPACE", "opsdeck"),
            database: env_string("OPSDECK_DB_NAME", "main"),
            username: env::var("OPSDECK_DB_USERNAME").ok(),
            password: env::var("OPSDECK_DB_PASSWORD").ok(),
        };

        let defaults = BootstrapConfig::default();
        let bootstrap = BootstrapConfig {
            admin_username: env_string("OPSDECK_ADMIN_USERNAME", &defaults.admin_username),
            admin_email: env_string("OPSDECK_ADMIN_EMAIL", &defaults.admin_email),
            admin_password: env_string("OPSDECK_ADMIN_PASSWORD", &defaults.admin_password),
            user_username: env_string("OPSDECK_USER_USERNAME", &defaults.user_username),
            user_email: env_string("OPSDECK_USER_EMAIL", &defaults.user_email),
            user_password: env_string("OPSDECK_USER_PASSWORD", &defaults.user_password),
            pepper,
        };

        Ok(Self {
            bind_addr: env_string("OPSDECK_BIND_ADDR", "0.0.0.0:3000"),
            db,
            auth,
            bootstrap,
        })
    }
}
