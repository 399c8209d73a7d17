//! Business logic services
//!
//! This module contains service layer components that encapsulate
//! business logic, separated from HTTP concerns.

pub mod frontend_binding;
pub mod frontend_service;

pub use frontend_binding::{
    bind_path, build_predicates, parse_tenant_id, FrontendPathParams, FrontendQueryParams, FRONTEND_QUERY_PARAMS,
};
pub use frontend_service::{CreateFrontendRequest, FrontendService};
