pub mod frontends;
pub mod health;

pub use frontends::{
    create_frontends_handler, delete_frontend_handler, get_frontends_handler,
    FrontendListResponse, FrontendResponse, FrontendsCreatedResponse,
};
pub use health::{health_handler, HealthResponse};
