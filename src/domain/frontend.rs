//! Frontend domain types
//!
//! A frontend is a listening endpoint attached to a load balancer. This module
//! holds the value types shared by the filter binder, the service and the
//! repository: the address family enum and the predicate vocabulary used to
//! scope store queries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::id::{FrontendId, LoadBalancerId, TenantId};

/// Address family a frontend listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    #[default]
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "ipv4",
            AddressFamily::Ipv6 => "ipv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ipv4" => Ok(AddressFamily::Ipv4),
            "ipv6" => Ok(AddressFamily::Ipv6),
            other => Err(format!("unknown address family '{}', expected ipv4 or ipv6", other)),
        }
    }
}

/// A single equality constraint on the `frontends` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    TenantId(TenantId),
    LoadBalancerId(LoadBalancerId),
    FrontendId(FrontendId),
    Port(i64),
    DisplayName(String),
    AddressFamily(AddressFamily),
}

impl Predicate {
    /// Column the predicate constrains
    pub fn column(&self) -> &'static str {
        match self {
            Predicate::TenantId(_) => "tenant_id",
            Predicate::LoadBalancerId(_) => "load_balancer_id",
            Predicate::FrontendId(_) => "frontend_id",
            Predicate::Port(_) => "port",
            Predicate::DisplayName(_) => "display_name",
            Predicate::AddressFamily(_) => "af_inet",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::TenantId(id) => write!(f, "tenant_id = {}", id),
            Predicate::LoadBalancerId(id) => write!(f, "load_balancer_id = {}", id),
            Predicate::FrontendId(id) => write!(f, "frontend_id = {}", id),
            Predicate::Port(port) => write!(f, "port = {}", port),
            Predicate::DisplayName(name) => write!(f, "display_name = {:?}", name),
            Predicate::AddressFamily(family) => write!(f, "af_inet = {}", family),
        }
    }
}

/// Ordered, conjunctive predicate set, always scoped to one tenant.
///
/// The only constructor takes the tenant, so a value of this type can never
/// describe an unscoped query. The first clause is always the tenant clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicates {
    tenant_id: TenantId,
    clauses: Vec<Predicate>,
}

impl Predicates {
    pub fn for_tenant(tenant_id: TenantId) -> Self {
        Self { tenant_id, clauses: vec![Predicate::TenantId(tenant_id)] }
    }

    /// Append a clause, returning the extended set
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.clauses.push(predicate);
        self
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn clauses(&self) -> &[Predicate] {
        &self.clauses
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.clauses.iter().map(Predicate::column).collect()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for Predicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.clauses.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(" AND "))
    }
}
