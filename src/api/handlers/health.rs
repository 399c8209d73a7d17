//! Health check endpoint for monitoring and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::{error::ApiError, routes::ApiState};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status (always "ok" when responding 200)
    #[schema(example = "ok")]
    pub status: String,
    /// Crate version
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Health check endpoint
///
/// Returns 200 OK when the server is up and the store answers a ping.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = crate::api::error::ErrorBody)
    )
)]
pub async fn health_handler(
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<HealthResponse>), ApiError> {
    state.frontend_service.health().await.map_err(|e| {
        tracing::warn!(error = %e, "Health check failed");
        ApiError::service_unavailable("Store unreachable")
    })?;

    Ok((
        StatusCode::OK,
        Json(HealthResponse { status: "ok".to_string(), version: crate::VERSION.to_string() }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_utils::TestApp;
    use axum::http::Method;

    #[tokio::test]
    async fn test_health_handler_returns_ok() {
        let app = TestApp::new("health").await;
        let (status, body) = app.send(Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], crate::VERSION);
    }
}
