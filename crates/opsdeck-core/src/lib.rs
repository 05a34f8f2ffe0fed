//! OpsDeck Core — domain models, repository traits, and the error
//! taxonomy shared across all crates.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{FieldError, OpsError, OpsResult};
