//! Request parameter binding for frontend queries
//!
//! Turns the raw path and query parameters of a frontend request into a
//! tenant-scoped [`Predicates`] set. Binding is a pure function of its inputs:
//! the tenant is validated first, then the optional path identifiers, then the
//! query parameters in the fixed order of [`FRONTEND_QUERY_PARAMS`]. The first
//! parse failure aborts the whole binding; no partial set is ever returned.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

use crate::domain::{AddressFamily, FrontendId, LoadBalancerId, Predicate, Predicates, TenantId};
use crate::errors::{LbApiError, Result};

/// Query parameters recognised by frontend reads and deletes, in binding order.
pub const FRONTEND_QUERY_PARAMS: [&str; 4] = ["port", "load_balancer_id", "display_name", "af_inet"];

/// Raw path parameters of a frontend request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontendPathParams {
    pub tenant_id: Option<String>,
    pub load_balancer_id: Option<String>,
    pub frontend_id: Option<String>,
}

impl FrontendPathParams {
    pub fn for_tenant<S: Into<String>>(tenant_id: S) -> Self {
        Self { tenant_id: Some(tenant_id.into()), ..Default::default() }
    }

    pub fn with_load_balancer<S: Into<String>>(mut self, load_balancer_id: S) -> Self {
        self.load_balancer_id = Some(load_balancer_id.into());
        self
    }

    pub fn with_frontend<S: Into<String>>(mut self, frontend_id: S) -> Self {
        self.frontend_id = Some(frontend_id.into());
        self
    }
}

impl From<HashMap<String, String>> for FrontendPathParams {
    fn from(mut params: HashMap<String, String>) -> Self {
        Self {
            tenant_id: params.remove("tenant_id"),
            load_balancer_id: params.remove("load_balancer_id"),
            frontend_id: params.remove("frontend_id"),
        }
    }
}

/// Raw query parameters of a frontend request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FrontendQueryParams {
    /// Listening port
    pub port: Option<String>,
    /// Parent load balancer id
    pub load_balancer_id: Option<String>,
    /// Exact display name
    pub display_name: Option<String>,
    /// Address family (`ipv4` or `ipv6`)
    pub af_inet: Option<String>,
}

impl FrontendQueryParams {
    /// Value of a recognised query parameter, by name
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "port" => self.port.as_deref(),
            "load_balancer_id" => self.load_balancer_id.as_deref(),
            "display_name" => self.display_name.as_deref(),
            "af_inet" => self.af_inet.as_deref(),
            _ => None,
        }
    }
}

/// Empty values are treated as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parse the tenant identifier. Missing, empty or malformed values are all
/// `InvalidTenant`.
pub fn parse_tenant_id(raw: Option<&str>) -> Result<TenantId> {
    let raw = present(raw).ok_or_else(|| LbApiError::invalid_tenant("tenant_id is required"))?;

    TenantId::parse(raw)
        .map_err(|_| LbApiError::invalid_tenant(format!("'{}' is not a valid tenant UUID", raw)))
}

/// Parse a UUID-valued identifier parameter.
pub fn parse_identifier<T>(parameter: &str, raw: &str) -> Result<T>
where
    T: FromStr<Err = uuid::Error>,
{
    raw.parse::<T>().map_err(|_| LbApiError::invalid_identifier(parameter, raw))
}

fn bind_query_param(name: &str, raw: &str) -> Result<Predicate> {
    match name {
        "port" => {
            let port = raw.parse::<i64>().map_err(|_| {
                LbApiError::invalid_parameter("port", format!("'{}' is not an integer", raw))
            })?;
            if !(1..=65535).contains(&port) {
                return Err(LbApiError::invalid_parameter(
                    "port",
                    format!("{} is outside 1-65535", port),
                ));
            }
            Ok(Predicate::Port(port))
        }
        "load_balancer_id" => {
            Ok(Predicate::LoadBalancerId(parse_identifier("load_balancer_id", raw)?))
        }
        "display_name" => Ok(Predicate::DisplayName(raw.to_string())),
        "af_inet" => raw
            .parse::<AddressFamily>()
            .map(Predicate::AddressFamily)
            .map_err(|message| LbApiError::invalid_parameter("af_inet", message)),
        other => Err(LbApiError::invalid_parameter(other, "unsupported filter")),
    }
}

/// Bind the path parameters alone: tenant, then `load_balancer_id`, then
/// `frontend_id`.
pub fn bind_path(path: &FrontendPathParams) -> Result<Predicates> {
    let tenant_id = parse_tenant_id(path.tenant_id.as_deref())?;
    let mut predicates = Predicates::for_tenant(tenant_id);
    debug!(tenant_id = %tenant_id, "path param");

    if let Some(raw) = present(path.load_balancer_id.as_deref()) {
        let load_balancer_id: LoadBalancerId = parse_identifier("load_balancer_id", raw)?;
        predicates = predicates.and(Predicate::LoadBalancerId(load_balancer_id));
        debug!(load_balancer_id = %load_balancer_id, "path param");
    }

    if let Some(raw) = present(path.frontend_id.as_deref()) {
        let frontend_id: FrontendId = parse_identifier("frontend_id", raw)?;
        predicates = predicates.and(Predicate::FrontendId(frontend_id));
        debug!(frontend_id = %frontend_id, "path param");
    }

    Ok(predicates)
}

/// Build the predicate set for a frontend request.
///
/// Clause order: tenant, path `load_balancer_id`, path `frontend_id`, then the
/// query parameters in [`FRONTEND_QUERY_PARAMS`] order.
pub fn build_predicates(
    path: &FrontendPathParams,
    query: &FrontendQueryParams,
) -> Result<Predicates> {
    let mut predicates = bind_path(path)?;

    for name in FRONTEND_QUERY_PARAMS {
        if let Some(raw) = present(query.get(name)) {
            predicates = predicates.and(bind_query_param(name, raw)?);
            debug!(query_param = name, param_value = raw, "query param");
        }
    }

    Ok(predicates)
}
