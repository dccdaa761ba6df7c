//! Student records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::store::{Collection, Record, RecordId};

/// A student on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    /// Unique positive id.
    pub id: RecordId,
    /// Display name.
    pub name: String,
}

impl Student {
    /// Create a student record.
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Record for Student {
    const COLLECTION: Collection = Collection::Students;

    fn id(&self) -> RecordId {
        self.id
    }

    fn with_id(self, id: RecordId) -> Self {
        Self { id, ..self }
    }
}

/// Response of `GET /students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentList {
    /// Number of students.
    pub total: usize,
    /// Students in roster order.
    pub data: Vec<Student>,
}

/// Body of `POST /student`. Only presence is checked; any JSON value is
/// accepted as a name unless writes are persisted. `null` counts as absent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewStudent {
    /// Required.
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
}

/// Body of `PUT /student` when writes are persisted.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StudentUpdate {
    /// Id of the student to update.
    pub id: Option<RecordId>,
    /// New name.
    pub name: Option<String>,
}

/// Acknowledgment returned by `POST /student` and `PUT /student`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentAck {
    /// Fixed confirmation message.
    pub message: String,
    /// Stored record, present only when writes are persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
}

impl StudentAck {
    /// Ack for an accepted create.
    pub const CREATED: &'static str = "student create received";
    /// Ack for an accepted update.
    pub const UPDATED: &'static str = "student update received";

    pub(crate) fn new(message: &str, student: Option<Student>) -> Self {
        Self {
            message: message.to_string(),
            student,
        }
    }
}
