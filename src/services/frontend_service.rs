//! Frontend business logic service
//!
//! Read, delete and batch create for frontends, separated from HTTP concerns.
//! Every operation validates its input completely before the repository is
//! touched.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use super::frontend_binding::{
    build_predicates, parse_identifier, parse_tenant_id, FrontendPathParams, FrontendQueryParams,
};
use crate::{
    domain::AddressFamily,
    errors::{LbApiError, Result},
    observability::MetricsRecorder,
    storage::{FrontendData, FrontendRepository, NewFrontend},
};

/// One frontend in a create request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFrontendRequest {
    /// Human-readable name
    #[validate(length(min = 1, max = 255, message = "display_name must be 1-255 characters"))]
    #[schema(example = "public-https")]
    pub display_name: String,

    /// Listening port
    #[validate(range(min = 1, max = 65535, message = "port must be between 1 and 65535"))]
    #[schema(example = 443)]
    pub port: i64,

    /// Parent load balancer id (UUID)
    #[schema(example = "1a2b3c4d-0000-4000-8000-000000000001")]
    pub load_balancer_id: String,

    /// Address family, `ipv4` when omitted
    #[serde(default)]
    pub af_inet: Option<AddressFamily>,
}

impl CreateFrontendRequest {
    fn into_new_frontend(self, position: usize) -> Result<NewFrontend> {
        if let Err(errors) = self.validate() {
            warn!(position, "Frontend payload failed validation");
            return Err(errors.into());
        }

        let load_balancer_id = parse_identifier("load_balancer_id", &self.load_balancer_id)?;

        Ok(NewFrontend {
            load_balancer_id,
            display_name: self.display_name,
            port: self.port,
            af_inet: self.af_inet.unwrap_or_default(),
        })
    }
}

/// Service for managing frontend business logic
pub struct FrontendService {
    repository: Arc<dyn FrontendRepository>,
    metrics: MetricsRecorder,
}

impl FrontendService {
    /// Create a new frontend service
    pub fn new(repository: Arc<dyn FrontendRepository>) -> Self {
        Self { repository, metrics: MetricsRecorder::new() }
    }

    fn observe<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        if let Err(error) = &result {
            self.metrics.record_rejection(operation, error);
        }
        result
    }

    /// All frontends of the tenant matching the request filters.
    ///
    /// An empty result is `NotFound`, never an empty list.
    #[instrument(skip(self, path, query), fields(tenant_id = ?path.tenant_id), name = "list_frontends")]
    pub async fn list(
        &self,
        path: &FrontendPathParams,
        query: &FrontendQueryParams,
    ) -> Result<Vec<FrontendData>> {
        let result = self.list_matching(path, query).await;
        self.observe("list", result)
    }

    async fn list_matching(
        &self,
        path: &FrontendPathParams,
        query: &FrontendQueryParams,
    ) -> Result<Vec<FrontendData>> {
        let predicates = build_predicates(path, query)?;
        let frontends = self.repository.find(&predicates).await?;

        self.metrics.record_frontends_read(frontends.len());

        if frontends.is_empty() {
            return Err(LbApiError::not_found("frontend", "No frontends match the request"));
        }

        Ok(frontends)
    }

    /// Delete the single frontend the request filters select.
    ///
    /// Zero matches is `NotFound`; more than one is `Ambiguous` and nothing is
    /// deleted.
    #[instrument(skip(self, path, query), fields(tenant_id = ?path.tenant_id), name = "delete_frontend")]
    pub async fn delete(
        &self,
        path: &FrontendPathParams,
        query: &FrontendQueryParams,
    ) -> Result<FrontendData> {
        let result = self.delete_single(path, query).await;
        self.observe("delete", result)
    }

    async fn delete_single(
        &self,
        path: &FrontendPathParams,
        query: &FrontendQueryParams,
    ) -> Result<FrontendData> {
        let predicates = build_predicates(path, query)?;
        let mut matches = self.repository.find(&predicates).await?;

        let frontend = match matches.len() {
            0 => return Err(LbApiError::not_found("frontend", "No frontend matches the request")),
            1 => matches.remove(0),
            n => {
                warn!(tenant_id = %predicates.tenant_id(), matches = n, filter = %predicates, "Refusing ambiguous delete");
                return Err(LbApiError::ambiguous("frontend", n));
            }
        };

        self.repository.delete(&predicates.tenant_id(), &frontend.frontend_id).await?;
        self.metrics.record_frontend_deleted();

        info!(
            tenant_id = %frontend.tenant_id,
            frontend_id = %frontend.frontend_id,
            "Frontend deleted"
        );

        Ok(frontend)
    }

    /// Create every frontend in `payloads` for the tenant, or none of them.
    ///
    /// The tenant comes from the request path only.
    #[instrument(skip(self, payloads), fields(count = payloads.len()), name = "create_frontends")]
    pub async fn create(
        &self,
        tenant_id: Option<&str>,
        payloads: Vec<CreateFrontendRequest>,
    ) -> Result<Vec<FrontendData>> {
        let result = self.create_batch(tenant_id, payloads).await;
        self.observe("create", result)
    }

    async fn create_batch(
        &self,
        tenant_id: Option<&str>,
        payloads: Vec<CreateFrontendRequest>,
    ) -> Result<Vec<FrontendData>> {
        let tenant_id = parse_tenant_id(tenant_id)?;

        if payloads.is_empty() {
            return Err(LbApiError::EmptyPayload);
        }

        let frontends = payloads
            .into_iter()
            .enumerate()
            .map(|(position, payload)| payload.into_new_frontend(position))
            .collect::<Result<Vec<_>>>()?;

        let created = self.repository.create_batch(&tenant_id, frontends).await?;
        self.metrics.record_frontends_created(created.len());

        info!(tenant_id = %tenant_id, count = created.len(), "Frontends created");

        Ok(created)
    }

    /// Check that the store is reachable
    pub async fn health(&self) -> Result<()> {
        self.repository.ping().await
    }
}
