//! # HTTP Request Metrics Middleware
//!
//! Axum middleware recording per-request counters and latency. Requests are
//! labelled with the matched route template rather than the raw path, so tenant
//! and resource ids never become metric labels.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use super::metrics::MetricsRecorder;

const UNMATCHED_ROUTE: &str = "unmatched";

/// Axum middleware that records request metrics and logs completion at debug level
pub async fn trace_http_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed = start.elapsed();

    tracing::debug!(
        method = %method,
        route = %route,
        status,
        elapsed_ms = elapsed.as_millis() as u64,
        "HTTP request completed"
    );

    MetricsRecorder::new().record_http_request(&method, &route, status, elapsed.as_secs_f64());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn test_handler() -> &'static str {
        "OK"
    }

    #[tokio::test]
    async fn test_middleware_passes_response_through() {
        let app = Router::new()
            .route("/v1/tenant/{tenant_id}/frontends", get(test_handler))
            .layer(axum::middleware::from_fn(trace_http_requests));

        let request = Request::builder()
            .uri("/v1/tenant/00000000-0000-0000-0000-00000000000a/frontends")
            .method("GET")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_handles_unmatched_routes() {
        let app = Router::new()
            .route("/health", get(test_handler))
            .layer(axum::middleware::from_fn(trace_http_requests));

        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
