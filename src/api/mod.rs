//! # REST API Components
//!
//! HTTP routing, handlers and error mapping for the tenant-scoped frontend API.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

#[cfg(test)]
pub mod test_utils;

pub use error::ApiError;
pub use routes::{build_router, build_router_with_config, ApiState, FRONTEND_ROUTES};
pub use server::start_api_server;
