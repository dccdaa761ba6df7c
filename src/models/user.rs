//! User records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::store::{Collection, Record, RecordId};

/// A registered user. `email` is unique across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique positive id.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Contact email.
    pub email: String,
}

impl User {
    /// Create a user record.
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        age: i64,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            email: email.into(),
        }
    }
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> RecordId {
        self.id
    }

    fn with_id(self, id: RecordId) -> Self {
        Self { id, ..self }
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }
}

/// Body of `POST /user`. All three fields must be present and non-null.
/// Their JSON types are only enforced when writes are persisted.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewUser {
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[schema(value_type = Option<i64>)]
    pub age: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub email: Option<Value>,
}

/// Submitted fields echoed back by `POST /user`, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserEcho {
    /// Assigned id, present only when writes are persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[schema(value_type = String)]
    pub name: Value,
    #[schema(value_type = i64)]
    pub age: Value,
    #[schema(value_type = String)]
    pub email: Value,
}

/// Response of `POST /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedUser {
    pub user: UserEcho,
}
