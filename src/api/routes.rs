use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, MethodRouter},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ApiServerConfig;
use crate::observability::trace_http_requests;
use crate::services::FrontendService;

use super::{
    docs,
    handlers::{
        create_frontends_handler, delete_frontend_handler, get_frontends_handler, health_handler,
    },
};

#[derive(Clone)]
pub struct ApiState {
    pub frontend_service: Arc<FrontendService>,
}

impl ApiState {
    pub fn new(frontend_service: Arc<FrontendService>) -> Self {
        Self { frontend_service }
    }
}

/// Operation a frontend route dispatches to. Fixes both the HTTP method and
/// the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontendRoute {
    Get,
    Create,
    Delete,
}

impl FrontendRoute {
    fn method_router(self) -> MethodRouter<ApiState> {
        match self {
            FrontendRoute::Get => get(get_frontends_handler),
            FrontendRoute::Create => post(create_frontends_handler),
            FrontendRoute::Delete => delete(delete_frontend_handler),
        }
    }
}

/// Tenant-scoped prefix shared by every frontend route
pub const TENANT_SCOPE: &str = "/v1/tenant/{tenant_id}";

/// Every frontend route, relative to [`TENANT_SCOPE`], registered once when the
/// router is built.
pub const FRONTEND_ROUTES: &[(FrontendRoute, &str)] = &[
    (FrontendRoute::Get, "/frontends"),
    (FrontendRoute::Get, "/frontends/{frontend_id}"),
    (FrontendRoute::Get, "/loadbalancers/{load_balancer_id}/frontends"),
    (FrontendRoute::Create, "/frontends"),
    (FrontendRoute::Delete, "/frontends"),
    (FrontendRoute::Delete, "/frontends/{frontend_id}"),
    (FrontendRoute::Delete, "/loadbalancers/{load_balancer_id}/frontends"),
];

/// Absolute path of a frontend route
pub fn scoped_path(route_path: &str) -> String {
    format!("{}{}", TENANT_SCOPE, route_path)
}

fn frontend_router() -> Router<ApiState> {
    let routes = FRONTEND_ROUTES
        .iter()
        .fold(Router::new(), |router, (route, path)| router.route(path, route.method_router()));

    Router::new().nest(TENANT_SCOPE, routes)
}

/// Router with default server settings
pub fn build_router(state: ApiState) -> Router {
    build_router_with_config(state, &ApiServerConfig::default())
}

pub fn build_router_with_config(state: ApiState, config: &ApiServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .merge(frontend_router())
        .layer(middleware::from_fn(trace_http_requests))
        .with_state(state)
        .merge(docs::docs_router())
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TimeoutLayer::new(config.timeout()))
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_relative_to_the_tenant_scope() {
        for (_, path) in FRONTEND_ROUTES {
            assert!(!path.contains("{tenant_id}"), "{path} repeats the tenant scope");
            assert!(scoped_path(path).starts_with("/v1/tenant/{tenant_id}/"));
        }
        assert_eq!(scoped_path("/frontends"), "/v1/tenant/{tenant_id}/frontends");
    }

    #[test]
    fn route_table_registers_each_method_path_pair_once() {
        let mut seen = std::collections::HashSet::new();
        for entry in FRONTEND_ROUTES {
            assert!(seen.insert(*entry), "duplicate route {:?}", entry);
        }
        assert_eq!(FRONTEND_ROUTES.len(), 7);
    }
}
