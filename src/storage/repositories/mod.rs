//! Repository implementations for persisted resources.

pub mod frontend;

pub use frontend::{FrontendData, FrontendRepository, NewFrontend, SqlxFrontendRepository};
