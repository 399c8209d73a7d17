use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::Error;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    UnprocessableEntity(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "ambiguous",
            ApiError::UnprocessableEntity(_) => "unprocessable_entity",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn service_unavailable<S: Into<String>>(msg: S) -> Self {
        ApiError::ServiceUnavailable(msg.into())
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "not_found")]
    pub error: String,
    #[schema(example = "Resource not found: No frontends match the request")]
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error = self.kind().to_string();

        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::UnprocessableEntity(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err.status_code() {
            400 => ApiError::BadRequest(err.to_string()),
            404 => ApiError::NotFound(err.to_string()),
            409 => ApiError::Conflict(err.to_string()),
            422 => ApiError::UnprocessableEntity(err.to_string()),
            _ => {
                // Store and internal failures are logged, not echoed to clients.
                tracing::error!(error = %err, source = ?std::error::Error::source(&err), "Request failed");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LbApiError;
    use http_body_util::BodyExt;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn classified_errors_map_to_statuses() {
        let cases = [
            (LbApiError::invalid_tenant("missing"), StatusCode::BAD_REQUEST, "bad_request"),
            (
                LbApiError::invalid_identifier("frontend_id", "x"),
                StatusCode::BAD_REQUEST,
                "bad_request",
            ),
            (LbApiError::EmptyPayload, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_entity"),
            (LbApiError::not_found("frontend", "none"), StatusCode::NOT_FOUND, "not_found"),
            (LbApiError::ambiguous("frontend", 2), StatusCode::CONFLICT, "ambiguous"),
        ];

        for (error, status, kind) in cases {
            let (actual_status, body) = body_json(ApiError::from(error)).await;
            assert_eq!(actual_status, status);
            assert_eq!(body["error"], kind);
        }
    }

    #[tokio::test]
    async fn store_failures_do_not_leak_details() {
        let error = LbApiError::database(sqlx::Error::PoolTimedOut, "Failed to insert frontend 'secret'");
        let (status, body) = body_json(ApiError::from(error)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert!(!body["message"].as_str().unwrap().contains("secret"));
    }
}
