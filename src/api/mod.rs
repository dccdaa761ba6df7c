//! HTTP API module: roster endpoints, cohort info, sitemap and health check.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{cors_layer, create_app, create_router};
