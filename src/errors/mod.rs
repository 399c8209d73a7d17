//! # Error Handling
//!
//! Error types for the load balancer API, defined with `thiserror`.

pub mod types;

pub use types::{LbApiError, Result};

/// Crate-wide error alias
pub type Error = LbApiError;
