//! # lbapi
//!
//! A multi-tenant REST API for load balancer frontends. Every request is scoped
//! by the tenant in its path; reads and deletes translate path and query
//! parameters into an ordered, tenant-first predicate set, and creates persist
//! a whole batch of frontends in one transaction or not at all.
//!
//! ## Architecture
//!
//! ```text
//! axum router → handlers → FrontendService → FrontendRepository → SQLite
//!                              ↑
//!                     build_predicates (pure)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lbapi::{
//!     api::{start_api_server, ApiState},
//!     services::FrontendService,
//!     storage::{create_pool, SqlxFrontendRepository},
//!     Config, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let pool = create_pool(&config.database).await?;
//!     let service = FrontendService::new(Arc::new(SqlxFrontendRepository::new(pool)));
//!     start_api_server(config.api, ApiState::new(Arc::new(service))).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod services;
pub mod storage;

// Re-export commonly used types and traits
pub use config::Config;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
