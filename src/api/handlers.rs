//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use utoipa::ToSchema;

use super::docs;
use crate::config::{Config, WriteMode};
use crate::error::{ApiError, ErrorBody, Result, StoreError};
use crate::models::{
    seed, CohortInfo, CreatedUser, NewStudent, NewUser, Student, StudentAck, StudentList,
    StudentUpdate, User,
};
use crate::roster::{self, WriteMethod};
use crate::store::{InMemoryRepository, RecordId, Repository};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Student collection.
    pub students: Arc<dyn Repository<Student>>,
    /// User collection.
    pub users: Arc<dyn Repository<User>>,
    /// Whether create/update requests mutate the collections.
    pub write_mode: WriteMode,
    /// Served by `GET /info`.
    pub cohort: Arc<CohortInfo>,
    /// Prometheus handle, when an exporter is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state over the given repositories.
    pub fn new(
        students: Arc<dyn Repository<Student>>,
        users: Arc<dyn Repository<User>>,
        config: &Config,
    ) -> Self {
        Self {
            students,
            users,
            write_mode: config.write_mode,
            cohort: Arc::new(config.cohort_info()),
            metrics: None,
        }
    }

    /// Create state with in-memory collections holding the seed data.
    pub fn seeded(config: &Config) -> std::result::Result<Self, StoreError> {
        let students = InMemoryRepository::seeded(seed::students())?;
        let users = InMemoryRepository::seeded(seed::users())?;
        Ok(Self::new(Arc::new(students), Arc::new(users), config))
    }

    /// Attach a Prometheus handle so `/metrics` is served.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Sitemap response.
#[derive(Debug, Serialize, ToSchema)]
pub struct Sitemap {
    /// `"<METHOD> <path>"` entries.
    pub endpoints: Vec<String>,
}

fn path_id(id: std::result::Result<Path<RecordId>, PathRejection>) -> Result<RecordId> {
    id.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

/// Health check handler - always returns 200.
#[utoipa::path(get, path = "/health", tag = "service",
    responses((status = 200, description = "Service is alive")))]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Sitemap handler - lists every documented endpoint.
#[utoipa::path(get, path = "/", tag = "service",
    responses((status = 200, description = "Documented endpoints", body = Sitemap)))]
pub async fn sitemap() -> Json<Sitemap> {
    Json(Sitemap {
        endpoints: docs::endpoints(),
    })
}

/// OpenAPI document handler.
pub async fn openapi_json() -> impl IntoResponse {
    Json(docs::openapi())
}

/// Prometheus exposition handler.
pub async fn metrics(State(state): State<AppState>) -> Result<String> {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .ok_or(ApiError::NotFound)
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Cohort info handler.
#[utoipa::path(get, path = "/info", tag = "cohort",
    responses((status = 200, description = "Cohort information", body = CohortInfo)))]
pub async fn info(State(state): State<AppState>) -> Json<CohortInfo> {
    Json(state.cohort.as_ref().clone())
}

/// List students with their total.
#[utoipa::path(get, path = "/students", tag = "students",
    responses((status = 200, description = "All students", body = StudentList)))]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<StudentList>> {
    Ok(Json(roster::list_students(state.students.as_ref())?))
}

/// Fetch one student by id.
#[utoipa::path(get, path = "/student/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "Student not found", body = ErrorBody),
    ))]
pub async fn get_student(
    State(state): State<AppState>,
    id: std::result::Result<Path<RecordId>, PathRejection>,
) -> Result<Json<Student>> {
    let id = path_id(id)?;
    Ok(Json(roster::get_student(state.students.as_ref(), id)?))
}

/// Create a student.
#[utoipa::path(post, path = "/student", tag = "students",
    request_body = NewStudent,
    responses(
        (status = 200, description = "Create acknowledged", body = StudentAck),
        (status = 400, description = "Missing name or malformed body", body = ErrorBody),
    ))]
pub async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StudentAck>> {
    let ack = roster::create_or_update_student(
        state.students.as_ref(),
        state.write_mode,
        WriteMethod::Create,
        &body,
    )?;
    Ok(Json(ack))
}

/// Update a student. The body is only read when writes are persisted.
#[utoipa::path(put, path = "/student", tag = "students",
    request_body = StudentUpdate,
    responses(
        (status = 200, description = "Update acknowledged", body = StudentAck),
        (status = 400, description = "Missing fields or malformed body", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
    ))]
pub async fn update_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StudentAck>> {
    let ack = roster::create_or_update_student(
        state.students.as_ref(),
        state.write_mode,
        WriteMethod::Update,
        &body,
    )?;
    Ok(Json(ack))
}

/// List users.
#[utoipa::path(get, path = "/users", tag = "users",
    responses((status = 200, description = "All users", body = [User])))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(roster::list_users(state.users.as_ref())?))
}

/// Fetch one user by id.
#[utoipa::path(get, path = "/user/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorBody),
    ))]
pub async fn get_user(
    State(state): State<AppState>,
    id: std::result::Result<Path<RecordId>, PathRejection>,
) -> Result<Json<User>> {
    let id = path_id(id)?;
    Ok(Json(roster::get_user(state.users.as_ref(), id)?))
}

/// Create a user.
#[utoipa::path(post, path = "/user", tag = "users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User accepted", body = CreatedUser),
        (
            status = 400,
            description = "Missing fields, duplicate email or malformed body",
            body = ErrorBody
        ),
    ))]
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse> {
    let body: NewUser = roster::parse_body(&body)?;
    let created = roster::create_user(state.users.as_ref(), state.write_mode, body)?;
    Ok((StatusCode::CREATED, Json(created)))
}
