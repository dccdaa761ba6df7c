//! HTTP API route definitions.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::Layer;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_student, create_user, get_student, get_user, health, info, list_students, list_users,
    metrics, not_found, openapi_json, sitemap, update_student, AppState,
};
use crate::config::Config;
use crate::error::ServiceError;
use crate::metrics::track_requests;

/// Build the CORS layer from configuration. No configured origins means
/// any origin is allowed.
pub fn cors_layer(config: &Config) -> Result<CorsLayer, ServiceError> {
    let origins = config.cors_origins().map_err(ServiceError::InvalidConfig)?;
    Ok(match origins {
        None => CorsLayer::permissive(),
        Some(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    })
}

/// Create the API router.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let mut router = Router::new()
        // Service endpoints
        .route("/", get(sitemap))
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json))
        // Cohort
        .route("/info", get(info))
        // Students
        .route("/students", get(list_students))
        .route("/student", post(create_student).put(update_student))
        .route("/student/:id", get(get_student))
        // Users
        .route("/users", get(list_users))
        .route("/user", post(create_user))
        .route("/user/:id", get(get_user));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(metrics));
    }

    router
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Wrap the router so trailing slashes are ignored (`/students/` == `/students`).
pub fn create_app(state: AppState, cors: CorsLayer) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state, cors))
}
