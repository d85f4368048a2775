//! API endpoint modules.

pub mod assessments;
pub mod assignments;
pub mod dashboard;
pub mod health;
pub mod openapi;
pub mod remarks;
pub mod users;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

use actix_web::web;

/// Configure every authenticated API route.
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(users::configure_routes)
        .configure(dashboard::configure_routes)
        .configure(remarks::configure_routes)
        .configure(assignments::configure_routes)
        .configure(assessments::configure_routes);
}
