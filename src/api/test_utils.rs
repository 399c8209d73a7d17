//! Test utilities for API handler testing
//!
//! Builds the full router over a fresh in-memory database and drives it with
//! `tower::ServiceExt::oneshot`, so handler tests exercise extraction, error
//! mapping and serialisation together.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::api::routes::{build_router, ApiState};
use crate::services::FrontendService;
use crate::storage::test_helpers::TestDatabase;
use crate::storage::SqlxFrontendRepository;

/// Router plus the database backing it
pub struct TestApp {
    pub router: Router,
    pub db: TestDatabase,
}

impl TestApp {
    pub async fn new(name: &str) -> Self {
        let db = TestDatabase::new(name).await;
        let repository = Arc::new(SqlxFrontendRepository::new(db.pool.clone()));
        let state = ApiState::new(Arc::new(FrontendService::new(repository)));
        Self { router: build_router(state), db }
    }

    /// Send a request with an optional raw body and decode the JSON response
    /// (`Null` for empty bodies).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder.body(body.map(|b| Body::from(b.to_string())).unwrap_or_default()).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn row_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM frontends").fetch_one(&self.db.pool).await.unwrap()
    }
}
