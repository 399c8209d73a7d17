//! Test database utilities for in-library tests.
//!
//! Each `TestDatabase` is a fresh in-memory SQLite database with all migrations
//! applied, so tests never observe each other's rows.
//!
//! This module is only available in test builds (`#[cfg(test)]`).

use crate::config::DatabaseConfig;
use crate::storage::{create_pool, DbPool};

/// Predictable tenant IDs for tests that need stable values.
pub const TENANT_A_ID: &str = "00000000-0000-0000-0000-00000000000a";
pub const TENANT_B_ID: &str = "00000000-0000-0000-0000-00000000000b";

/// A migrated in-memory test database.
///
/// The pool keeps one connection open; the database disappears when this
/// struct and every clone of its pool are dropped.
pub struct TestDatabase {
    pub pool: DbPool,
}

impl TestDatabase {
    /// Create a new test database. The `prefix` is only used in panic messages.
    pub async fn new(prefix: &str) -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory())
            .await
            .unwrap_or_else(|e| panic!("Failed to create test pool for {}: {}", prefix, e));

        Self { pool }
    }
}
