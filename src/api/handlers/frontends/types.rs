//! Frontend handler DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AddressFamily, FrontendId, LoadBalancerId, TenantId};
use crate::storage::FrontendData;

/// API version reported in every frontend response body
pub const API_VERSION: &str = "v1";

/// Message reported when a create batch commits
pub const CREATED_MESSAGE: &str = "resource created";

/// A stored frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FrontendResponse {
    pub frontend_id: FrontendId,
    pub tenant_id: TenantId,
    pub load_balancer_id: LoadBalancerId,
    #[schema(example = "public-https")]
    pub display_name: String,
    #[schema(example = 443)]
    pub port: i64,
    pub af_inet: AddressFamily,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<FrontendData> for FrontendResponse {
    fn from(data: FrontendData) -> Self {
        Self {
            frontend_id: data.frontend_id,
            tenant_id: data.tenant_id,
            load_balancer_id: data.load_balancer_id,
            display_name: data.display_name,
            port: data.port,
            af_inet: data.af_inet,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }
}

/// Frontends matching a read
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FrontendListResponse {
    #[schema(example = "v1")]
    pub version: String,
    pub frontends: Vec<FrontendResponse>,
}

impl FrontendListResponse {
    pub fn new(frontends: Vec<FrontendData>) -> Self {
        Self {
            version: API_VERSION.to_string(),
            frontends: frontends.into_iter().map(FrontendResponse::from).collect(),
        }
    }
}

/// Frontends persisted by a create batch
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FrontendsCreatedResponse {
    #[schema(example = "v1")]
    pub version: String,
    #[schema(example = "resource created")]
    pub message: String,
    #[schema(example = 2)]
    pub count: usize,
    pub frontends: Vec<FrontendResponse>,
}

impl FrontendsCreatedResponse {
    pub fn new(frontends: Vec<FrontendData>) -> Self {
        Self {
            version: API_VERSION.to_string(),
            message: CREATED_MESSAGE.to_string(),
            count: frontends.len(),
            frontends: frontends.into_iter().map(FrontendResponse::from).collect(),
        }
    }
}
