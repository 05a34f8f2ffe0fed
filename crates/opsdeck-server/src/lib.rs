//! OpsDeck Server — HTTP surface for the operations console.
//!
//! Request flow: token validation (extractor) → authorization gate →
//! resource manager → storage query → JSON response. Handlers never
//! run against an unauthenticated caller.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;
