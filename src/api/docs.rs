use axum::{routing::get, Json, Router};
use utoipa::openapi::path::{Operation, ParameterBuilder, ParameterIn, PathItem};
use utoipa::openapi::schema::{ObjectBuilder, Type};
use utoipa::openapi::Required;
use utoipa::{Modify, OpenApi};

use crate::api::error::ErrorBody;
use crate::api::handlers::{
    FrontendListResponse, FrontendResponse, FrontendsCreatedResponse, HealthResponse,
};
use crate::api::routes::{scoped_path, FrontendRoute, FRONTEND_ROUTES};
use crate::domain::{AddressFamily, FrontendId, LoadBalancerId, TenantId};
use crate::services::CreateFrontendRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::frontends::get_frontends_handler,
        crate::api::handlers::frontends::create_frontends_handler,
        crate::api::handlers::frontends::delete_frontend_handler,
    ),
    components(schemas(
        CreateFrontendRequest,
        FrontendResponse,
        FrontendListResponse,
        FrontendsCreatedResponse,
        HealthResponse,
        ErrorBody,
        AddressFamily,
        TenantId,
        LoadBalancerId,
        FrontendId,
    )),
    modifiers(&ScopedFrontendPaths),
    tags(
        (name = "Frontends", description = "Tenant-scoped load balancer frontends"),
        (name = "health", description = "Liveness and store connectivity"),
    ),
    info(
        title = "Load Balancer Frontend API",
        description = "Read, batch create and delete frontends of one tenant."
    )
)]
pub struct ApiDoc;

/// Documents every route of the frontend table. Handlers are annotated once on
/// the collection path; the other paths reuse those operations with their extra
/// path parameters.
struct ScopedFrontendPaths;

impl Modify for ScopedFrontendPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let collection_path = scoped_path("/frontends");
        let Some(collection) = openapi.paths.paths.get(&collection_path).cloned() else {
            return;
        };

        for (route, path) in FRONTEND_ROUTES {
            let full_path = scoped_path(path);
            if full_path == collection_path {
                continue;
            }

            let Some(mut operation) = route_operation(&collection, *route) else {
                continue;
            };
            operation.operation_id =
                operation.operation_id.map(|id| format!("{}_{}", id, path_suffix(path)));
            let parameters = operation.parameters.get_or_insert_with(Vec::new);
            for name in path_parameters(path) {
                parameters.push(
                    ParameterBuilder::new()
                        .name(name)
                        .parameter_in(ParameterIn::Path)
                        .required(Required::True)
                        .description(Some(format!("{} (UUID)", name)))
                        .schema(Some(ObjectBuilder::new().schema_type(Type::String)))
                        .build(),
                );
            }

            let item = openapi.paths.paths.entry(full_path).or_insert_with(PathItem::default);
            match route {
                FrontendRoute::Get => item.get = Some(operation),
                FrontendRoute::Create => item.post = Some(operation),
                FrontendRoute::Delete => item.delete = Some(operation),
            }
        }
    }
}

fn route_operation(item: &PathItem, route: FrontendRoute) -> Option<Operation> {
    match route {
        FrontendRoute::Get => item.get.clone(),
        FrontendRoute::Create => item.post.clone(),
        FrontendRoute::Delete => item.delete.clone(),
    }
}

/// Names of the `{...}` segments of a route path
fn path_parameters(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
}

fn path_suffix(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.trim_matches(|c: char| c == '{' || c == '}'))
        .collect::<Vec<_>>()
        .join("_")
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
