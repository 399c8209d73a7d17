//! Domain types for load balancer frontends.

pub mod frontend;
pub mod id;

pub use frontend::{AddressFamily, Predicate, Predicates};
pub use id::{FrontendId, LoadBalancerId, TenantId};
