//! Unified error types for the cohort API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

use crate::store::RecordId;

/// Startup and process-level errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Seed data violated a store invariant.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Prometheus recorder could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Repository failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this id is already stored.
    #[error("duplicate id {0}")]
    DuplicateId(RecordId),

    /// A record already holds this unique key (e.g. an email).
    #[error("duplicate key {0}")]
    DuplicateKey(String),

    /// No record with this id.
    #[error("record {0} not found")]
    NotFound(RecordId),

    /// The collection lock was poisoned by a panicking writer.
    #[error("collection lock poisoned")]
    Poisoned,
}

/// Generic application exception carrying its own status code.
///
/// Serialized as `{"message": ..., <payload fields>}`.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct AppException {
    /// Human readable message.
    pub message: String,
    /// Status code returned to the client.
    pub status: StatusCode,
    /// Extra fields merged into the body.
    pub payload: Option<Map<String, Value>>,
}

impl AppException {
    /// Create an exception with the default 400 status.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
            payload: None,
        }
    }

    /// Override the status code.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Attach extra body fields.
    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Build the JSON body.
    pub fn to_body(&self) -> Value {
        let mut body = self.payload.clone().unwrap_or_default();
        body.insert("message".to_string(), Value::String(self.message.clone()));
        Value::Object(body)
    }
}

impl From<StoreError> for AppException {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::DuplicateId(_) | StoreError::DuplicateKey(_) => StatusCode::CONFLICT,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        AppException::new(err.to_string()).with_status(status)
    }
}

/// Body of every client-input error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable reason.
    pub error: String,
}

/// Everything a request can fail with.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Student lookup missed.
    #[error("student not found")]
    StudentNotFound(RecordId),

    /// User lookup missed.
    #[error("user not found")]
    UserNotFound(RecordId),

    /// One or more required body fields were absent or null.
    #[error("{0}")]
    MissingFields(&'static str),

    /// Email already belongs to a user.
    #[error("email already registered to a user")]
    DuplicateEmail(String),

    /// Body was not valid JSON for the endpoint.
    #[error("{0}")]
    MalformedBody(String),

    /// Unknown route, or a path id that is not an integer.
    #[error("not found")]
    NotFound,

    /// Generic application exception.
    #[error(transparent)]
    Application(#[from] AppException),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Application(err.into())
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::StudentNotFound(_) | ApiError::UserNotFound(_) | ApiError::NotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::MissingFields(_)
            | ApiError::DuplicateEmail(_)
            | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Application(exc) => exc.status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Application(exc) => (status, Json(exc.to_body())).into_response(),
            other => (
                status,
                Json(ErrorBody {
                    error: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Convenient Result type alias for request handling.
pub type Result<T> = std::result::Result<T, ApiError>;
