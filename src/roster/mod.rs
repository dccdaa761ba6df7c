//! Roster operations over the student and user collections.
//!
//! These are plain functions over a [`Repository`](crate::store::Repository)
//! so they can be exercised without the HTTP layer.

pub mod students;
pub mod users;

use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::{ApiError, Result};

pub use students::{create_or_update_student, get_student, list_students};
pub use users::{create_user, get_user, list_users};

/// Write verb accepted by the student endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum WriteMethod {
    /// Create a record.
    #[strum(serialize = "POST")]
    Create,
    /// Update a record.
    #[strum(serialize = "PUT")]
    Update,
}

/// Parse a JSON request body. The `Content-Type` header is not consulted.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::MalformedBody(format!("invalid JSON body: {e}")))
}

/// A submitted field that must be a JSON string before it can be stored.
pub(crate) fn required_str<'a>(value: &'a Value, field: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ApiError::MalformedBody(format!("{field} must be a string")))
}

/// A submitted field that must be a JSON integer before it can be stored.
pub(crate) fn required_int(value: &Value, field: &str) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| ApiError::MalformedBody(format!("{field} must be an integer")))
}
