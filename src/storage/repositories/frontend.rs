//! Frontend repository
//!
//! Persistence for frontends. Reads take a tenant-scoped [`Predicates`] set and
//! translate it into a parameterised `WHERE` clause. Batch creation runs inside a
//! single transaction guard: returning early on any insert error drops the guard,
//! which rolls the whole batch back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use tracing::instrument;

use crate::domain::{AddressFamily, FrontendId, LoadBalancerId, Predicate, Predicates, TenantId};
use crate::errors::{LbApiError, Result};
use crate::storage::DbPool;

const FRONTEND_COLUMNS: &str =
    "frontend_id, tenant_id, load_balancer_id, display_name, port, af_inet, created_at, updated_at";

/// Database row structure for frontends
#[derive(Debug, Clone, FromRow)]
struct FrontendRow {
    pub frontend_id: FrontendId,
    pub tenant_id: TenantId,
    pub load_balancer_id: LoadBalancerId,
    pub display_name: String,
    pub port: i64,
    pub af_inet: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Stored frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendData {
    pub frontend_id: FrontendId,
    pub tenant_id: TenantId,
    pub load_balancer_id: LoadBalancerId,
    pub display_name: String,
    pub port: i64,
    pub af_inet: AddressFamily,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<FrontendRow> for FrontendData {
    type Error = LbApiError;

    fn try_from(row: FrontendRow) -> Result<Self> {
        let af_inet = row.af_inet.parse::<AddressFamily>().map_err(|e| {
            LbApiError::internal(format!("Stored frontend {} is corrupt: {}", row.frontend_id, e))
        })?;

        Ok(Self {
            frontend_id: row.frontend_id,
            tenant_id: row.tenant_id,
            load_balancer_id: row.load_balancer_id,
            display_name: row.display_name,
            port: row.port,
            af_inet,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A validated frontend ready to be inserted. Carries no tenant: the tenant is
/// always supplied by the caller of [`FrontendRepository::create_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFrontend {
    pub load_balancer_id: LoadBalancerId,
    pub display_name: String,
    pub port: i64,
    pub af_inet: AddressFamily,
}

/// Store operations the frontend service depends on
#[async_trait]
pub trait FrontendRepository: Send + Sync {
    /// All frontends matching every predicate, oldest first
    async fn find(&self, predicates: &Predicates) -> Result<Vec<FrontendData>>;

    /// Delete one frontend owned by `tenant_id`
    async fn delete(&self, tenant_id: &TenantId, frontend_id: &FrontendId) -> Result<()>;

    /// Insert all rows in one transaction, stamped with `tenant_id`
    async fn create_batch(
        &self,
        tenant_id: &TenantId,
        frontends: Vec<NewFrontend>,
    ) -> Result<Vec<FrontendData>>;

    /// Check store connectivity
    async fn ping(&self) -> Result<()>;
}

/// SQLx-backed frontend repository
#[derive(Debug, Clone)]
pub struct SqlxFrontendRepository {
    pool: DbPool,
}

impl SqlxFrontendRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn push_predicates(builder: &mut QueryBuilder<'_, Sqlite>, predicates: &Predicates) {
        for (index, predicate) in predicates.clauses().iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            builder.push(predicate.column()).push(" = ");
            match predicate {
                Predicate::TenantId(id) => builder.push_bind(*id),
                Predicate::LoadBalancerId(id) => builder.push_bind(*id),
                Predicate::FrontendId(id) => builder.push_bind(*id),
                Predicate::Port(port) => builder.push_bind(*port),
                Predicate::DisplayName(name) => builder.push_bind(name.clone()),
                Predicate::AddressFamily(family) => builder.push_bind(family.as_str()),
            };
        }
    }
}

#[async_trait]
impl FrontendRepository for SqlxFrontendRepository {
    #[instrument(skip(self), fields(tenant_id = %predicates.tenant_id(), filter = %predicates), name = "db_find_frontends")]
    async fn find(&self, predicates: &Predicates) -> Result<Vec<FrontendData>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM frontends", FRONTEND_COLUMNS));
        Self::push_predicates(&mut builder, predicates);
        // rowid follows insertion order; created_at text does not sort reliably.
        builder.push(" ORDER BY rowid ASC");

        let rows = builder.build_query_as::<FrontendRow>().fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!(error = %e, tenant_id = %predicates.tenant_id(), "Failed to query frontends");
            LbApiError::database(e, "Failed to query frontends")
        })?;

        rows.into_iter().map(FrontendData::try_from).collect()
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id, frontend_id = %frontend_id), name = "db_delete_frontend")]
    async fn delete(&self, tenant_id: &TenantId, frontend_id: &FrontendId) -> Result<()> {
        let result = sqlx::query("DELETE FROM frontends WHERE frontend_id = ? AND tenant_id = ?")
            .bind(frontend_id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, frontend_id = %frontend_id, "Failed to delete frontend");
                LbApiError::database(e, format!("Failed to delete frontend '{}'", frontend_id))
            })?;

        if result.rows_affected() == 0 {
            return Err(LbApiError::not_found(
                "frontend",
                format!("Frontend '{}' not found", frontend_id),
            ));
        }

        tracing::info!(tenant_id = %tenant_id, frontend_id = %frontend_id, "Deleted frontend");

        Ok(())
    }

    #[instrument(skip(self, frontends), fields(tenant_id = %tenant_id, count = frontends.len()), name = "db_create_frontends")]
    async fn create_batch(
        &self,
        tenant_id: &TenantId,
        frontends: Vec<NewFrontend>,
    ) -> Result<Vec<FrontendData>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            LbApiError::database(e, "Failed to begin transaction for frontend creation")
        })?;

        let mut created = Vec::with_capacity(frontends.len());

        for (index, frontend) in frontends.into_iter().enumerate() {
            let frontend_id = FrontendId::new();
            let now = chrono::Utc::now();

            // An error here returns with `tx` still open; dropping it rolls back.
            sqlx::query(
                "INSERT INTO frontends (frontend_id, tenant_id, load_balancer_id, display_name, port, af_inet, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(frontend_id)
            .bind(tenant_id)
            .bind(frontend.load_balancer_id)
            .bind(&frontend.display_name)
            .bind(frontend.port)
            .bind(frontend.af_inet.as_str())
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    tenant_id = %tenant_id,
                    position = index,
                    display_name = %frontend.display_name,
                    "Frontend insert failed, rolling back batch"
                );
                LbApiError::database(
                    e,
                    format!("Failed to insert frontend '{}'", frontend.display_name),
                )
            })?;

            created.push(FrontendData {
                frontend_id,
                tenant_id: *tenant_id,
                load_balancer_id: frontend.load_balancer_id,
                display_name: frontend.display_name,
                port: frontend.port,
                af_inet: frontend.af_inet,
                created_at: now,
                updated_at: now,
            });
        }

        tx.commit()
            .await
            .map_err(|e| LbApiError::database(e, "Failed to commit frontend creation"))?;

        tracing::info!(tenant_id = %tenant_id, count = created.len(), "Created frontends");

        Ok(created)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| LbApiError::database(e, "Database connectivity check failed"))?;
        Ok(())
    }
}
