//! Common test utilities for integration tests.
//!
//! Each `TestApp` owns the full router over a fresh, migrated in-memory
//! database, so tests never observe each other's rows.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use lbapi::{
    api::{build_router, ApiState},
    config::DatabaseConfig,
    services::FrontendService,
    storage::{create_pool, DbPool, SqlxFrontendRepository},
};
use serde_json::Value;
use tower::ServiceExt;

pub const TENANT_A: &str = "6f1c2a9e-3b4d-4e5f-8a7b-0c1d2e3f4a5b";
pub const TENANT_B: &str = "0b9a8c7d-6e5f-4a3b-9c2d-1e0f9a8b7c6d";
pub const LB_1: &str = "11111111-2222-4333-8444-555555555555";
pub const LB_2: &str = "99999999-8888-4777-8666-555555555555";

pub struct TestApp {
    router: Router,
    pub pool: DbPool,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn row_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM frontends")
            .fetch_one(&self.pool)
            .await
            .expect("count frontends")
    }
}

pub async fn setup_test_app() -> TestApp {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.expect("create sqlite pool");
    let repository = Arc::new(SqlxFrontendRepository::new(pool.clone()));
    let state = ApiState::new(Arc::new(FrontendService::new(repository)));

    TestApp { router: build_router(state), pool }
}

/// Send a request and return the status with the decoded JSON body
/// (`Value::Null` when the body is empty).
pub async fn send_request(
    app: &TestApp,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);

    let request = if let Some(json) = body {
        let bytes = serde_json::to_vec(&json).expect("serialize body");
        builder
            .header("content-type", "application/json")
            .body(Body::from(bytes))
            .expect("build request")
    } else {
        builder.body(Body::empty()).expect("build request")
    };

    let response = app.router().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read response body");

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse json response")
    };

    (status, json)
}

pub fn frontends_path(tenant: &str) -> String {
    format!("/v1/tenant/{}/frontends", tenant)
}

pub fn frontend(name: &str, port: i64, load_balancer_id: &str) -> Value {
    serde_json::json!({
        "display_name": name,
        "port": port,
        "load_balancer_id": load_balancer_id,
    })
}

/// Create frontends for `tenant` and return the created rows.
pub async fn create_frontends(app: &TestApp, tenant: &str, rows: Vec<Value>) -> Vec<Value> {
    let (status, body) =
        send_request(app, Method::POST, &frontends_path(tenant), Some(Value::Array(rows))).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["frontends"].as_array().expect("frontends array").clone()
}
