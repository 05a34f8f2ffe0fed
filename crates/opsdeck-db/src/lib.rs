//! OpsDeck Database — SurrealDB connection management, schema
//! migrations, repository implementations, and the startup bootstrap.

mod bootstrap;
mod connection;
mod error;
pub mod repository;
mod schema;

pub use bootstrap::{BootstrapConfig, run_bootstrap};
pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
