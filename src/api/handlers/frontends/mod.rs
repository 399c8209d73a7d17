//! Frontend HTTP handlers
//!
//! Every frontend route is scoped by the `tenant_id` path segment. Read and
//! delete share the same path and query binding, so one handler serves each
//! verb across the collection, single-frontend and per-load-balancer paths.

mod types;

pub use types::{
    FrontendListResponse, FrontendResponse, FrontendsCreatedResponse, API_VERSION,
    CREATED_MESSAGE,
};

use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::instrument;

use crate::{
    api::{error::ApiError, routes::ApiState},
    services::{bind_path, CreateFrontendRequest, FrontendPathParams, FrontendQueryParams},
};

/// Unwrap an extractor result. A malformed path is reported ahead of the
/// rejection, in the order the binder checks it.
fn path_first<T, R>(path: &FrontendPathParams, extracted: Result<T, R>) -> Result<T, ApiError>
where
    R: Into<ApiError>,
{
    extracted.map_err(|rejection| match bind_path(path) {
        Err(path_error) => ApiError::from(path_error),
        Ok(_) => rejection.into(),
    })
}

#[utoipa::path(
    get,
    path = "/v1/tenant/{tenant_id}/frontends",
    params(
        ("tenant_id" = String, Path, description = "Owning tenant (UUID)"),
        FrontendQueryParams
    ),
    responses(
        (status = 200, description = "Matching frontends", body = FrontendListResponse),
        (status = 400, description = "Malformed tenant, identifier or filter", body = crate::api::error::ErrorBody),
        (status = 404, description = "No frontend matches", body = crate::api::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorBody)
    ),
    tag = "Frontends"
)]
#[instrument(skip(state, path, query), fields(tenant_id = ?path.get("tenant_id")))]
pub async fn get_frontends_handler(
    State(state): State<ApiState>,
    Path(path): Path<HashMap<String, String>>,
    query: Result<Query<FrontendQueryParams>, QueryRejection>,
) -> Result<Json<FrontendListResponse>, ApiError> {
    let path = FrontendPathParams::from(path);
    let Query(query) = path_first(&path, query)?;

    let frontends = state.frontend_service.list(&path, &query).await?;

    Ok(Json(FrontendListResponse::new(frontends)))
}

#[utoipa::path(
    post,
    path = "/v1/tenant/{tenant_id}/frontends",
    params(("tenant_id" = String, Path, description = "Owning tenant (UUID)")),
    request_body = Vec<CreateFrontendRequest>,
    responses(
        (status = 201, description = "All frontends created", body = FrontendsCreatedResponse),
        (status = 400, description = "Malformed tenant, body or payload", body = crate::api::error::ErrorBody),
        (status = 422, description = "Empty batch", body = crate::api::error::ErrorBody),
        (status = 500, description = "Store failure, nothing was created", body = crate::api::error::ErrorBody)
    ),
    tag = "Frontends"
)]
#[instrument(skip(state, path, payload), fields(tenant_id = ?path.get("tenant_id")))]
pub async fn create_frontends_handler(
    State(state): State<ApiState>,
    Path(path): Path<HashMap<String, String>>,
    payload: Result<Json<Vec<CreateFrontendRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<FrontendsCreatedResponse>), ApiError> {
    let path = FrontendPathParams::from(path);
    let Json(payloads) = path_first(&path, payload)?;

    let created = state.frontend_service.create(path.tenant_id.as_deref(), payloads).await?;

    Ok((StatusCode::CREATED, Json(FrontendsCreatedResponse::new(created))))
}

#[utoipa::path(
    delete,
    path = "/v1/tenant/{tenant_id}/frontends",
    params(
        ("tenant_id" = String, Path, description = "Owning tenant (UUID)"),
        FrontendQueryParams
    ),
    responses(
        (status = 204, description = "Exactly one frontend matched and was deleted"),
        (status = 400, description = "Malformed tenant, identifier or filter", body = crate::api::error::ErrorBody),
        (status = 404, description = "No frontend matches", body = crate::api::error::ErrorBody),
        (status = 409, description = "Filter matches more than one frontend", body = crate::api::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorBody)
    ),
    tag = "Frontends"
)]
#[instrument(skip(state, path, query), fields(tenant_id = ?path.get("tenant_id")))]
pub async fn delete_frontend_handler(
    State(state): State<ApiState>,
    Path(path): Path<HashMap<String, String>>,
    query: Result<Query<FrontendQueryParams>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let path = FrontendPathParams::from(path);
    let Query(query) = path_first(&path, query)?;

    state.frontend_service.delete(&path, &query).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_utils::TestApp;
    use crate::storage::test_helpers::TENANT_A_ID;
    use axum::http::Method;

    const LB: &str = "1a2b3c4d-0000-4000-8000-000000000001";

    fn frontends_uri(tenant: &str) -> String {
        format!("/v1/tenant/{}/frontends", tenant)
    }

    #[tokio::test]
    async fn bad_tenant_is_reported_before_bad_body() {
        let app = TestApp::new("handler_tenant_first").await;

        let (status, body) = app.send(Method::POST, &frontends_uri("nope"), Some("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("Invalid tenant"));
    }

    #[tokio::test]
    async fn bad_path_identifier_is_reported_before_bad_query() {
        let app = TestApp::new("handler_path_first").await;
        let uri = format!("{}/not-a-uuid?port=1&port=2", frontends_uri(TENANT_A_ID));

        for method in [Method::GET, Method::DELETE] {
            let (status, body) = app.send(method, &uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(
                body["message"].as_str().unwrap().contains("Invalid identifier for 'frontend_id'"),
                "unexpected body {body}"
            );
        }

        let uri = format!("/v1/tenant/{}/loadbalancers/lb-1/frontends?port=1&port=2", TENANT_A_ID);
        let (status, body) = app.send(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("'load_balancer_id'"));
    }

    #[tokio::test]
    async fn bad_query_with_valid_path_is_a_query_error() {
        let app = TestApp::new("handler_bad_query").await;
        let uri = format!("{}?port=1&port=2", frontends_uri(TENANT_A_ID));

        let (status, body) = app.send(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid query string"));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = TestApp::new("handler_bad_json").await;

        let (status, body) =
            app.send(Method::POST, &frontends_uri(TENANT_A_ID), Some("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert_eq!(app.row_count().await, 0);
    }

    #[tokio::test]
    async fn single_and_per_load_balancer_paths_share_the_read_handler() {
        let app = TestApp::new("handler_paths").await;
        let payload =
            format!(r#"[{{"display_name":"web","port":80,"load_balancer_id":"{}"}}]"#, LB);
        let (status, created) =
            app.send(Method::POST, &frontends_uri(TENANT_A_ID), Some(&payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["frontends"][0]["frontend_id"].as_str().unwrap().to_string();

        let (status, body) = app
            .send(Method::GET, &format!("{}/{}", frontends_uri(TENANT_A_ID), id), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["frontends"][0]["frontend_id"], id.as_str());

        let (status, body) = app
            .send(
                Method::GET,
                &format!("/v1/tenant/{}/loadbalancers/{}/frontends", TENANT_A_ID, LB),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], API_VERSION);
        assert_eq!(body["frontends"].as_array().unwrap().len(), 1);
    }
}
