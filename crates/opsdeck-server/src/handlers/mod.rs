//! HTTP handlers, one module per resource.
//!
//! Every protected handler runs the same ordered guard pipeline:
//! authenticate (the `AuthUser` extractor), authorize (the capability
//! gate), validate, then call the resource manager.

pub mod alerts;
pub mod auth;
pub mod backups;
pub mod health;
pub mod logs;
pub mod metrics;
pub mod notifications;
pub mod settings;
pub mod users;
