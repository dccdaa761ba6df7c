//! Student lookup and mutation.

use tracing::{debug, info, instrument, warn};

use super::{parse_body, required_str, WriteMethod};
use crate::config::WriteMode;
use crate::error::{ApiError, Result, StoreError};
use crate::metrics;
use crate::models::{NewStudent, Student, StudentAck, StudentList, StudentUpdate};
use crate::store::{Collection, RecordId, Repository};

/// All students with their count.
pub fn list_students(repo: &dyn Repository<Student>) -> Result<StudentList> {
    let data = repo.list()?;
    Ok(StudentList {
        total: data.len(),
        data,
    })
}

/// Student with the given id.
pub fn get_student(repo: &dyn Repository<Student>, id: RecordId) -> Result<Student> {
    repo.get_by_id(id)?.ok_or(ApiError::StudentNotFound(id))
}

/// Handle `POST`/`PUT /student`.
///
/// Create requires `name`. In [`WriteMode::Echo`] neither verb touches the
/// store, and update ignores `body` entirely.
#[instrument(skip(repo, body), fields(body_len = body.len()))]
pub fn create_or_update_student(
    repo: &dyn Repository<Student>,
    mode: WriteMode,
    method: WriteMethod,
    body: &[u8],
) -> Result<StudentAck> {
    match method {
        WriteMethod::Create => create_student(repo, mode, parse_body(body)?),
        WriteMethod::Update => match mode {
            WriteMode::Echo => Ok(StudentAck::new(StudentAck::UPDATED, None)),
            WriteMode::Persist => update_student(repo, parse_body(body)?),
        },
    }
}

fn create_student(
    repo: &dyn Repository<Student>,
    mode: WriteMode,
    body: NewStudent,
) -> Result<StudentAck> {
    let Some(name) = body.name.filter(|name| !name.is_null()) else {
        warn!("Rejected student create without name");
        metrics::inc_validation_failures(Collection::Students);
        return Err(ApiError::MissingFields("name is required"));
    };

    match mode {
        WriteMode::Echo => {
            debug!(%name, "Received student");
            Ok(StudentAck::new(StudentAck::CREATED, None))
        }
        WriteMode::Persist => {
            let name = required_str(&name, "name")?;
            let stored = repo.insert(Student::new(0, name))?;
            metrics::inc_records_written(Collection::Students);
            info!(id = stored.id, name = %stored.name, "Created student");
            Ok(StudentAck::new(StudentAck::CREATED, Some(stored)))
        }
    }
}

fn update_student(repo: &dyn Repository<Student>, body: StudentUpdate) -> Result<StudentAck> {
    let (Some(id), Some(name)) = (body.id, body.name) else {
        metrics::inc_validation_failures(Collection::Students);
        return Err(ApiError::MissingFields("id and name are required"));
    };

    let stored = repo
        .update_by_id(id, Student::new(id, name))
        .map_err(|e| match e {
            StoreError::NotFound(id) => ApiError::StudentNotFound(id),
            other => other.into(),
        })?;
    metrics::inc_records_written(Collection::Students);
    info!(id, name = %stored.name, "Updated student");
    Ok(StudentAck::new(StudentAck::UPDATED, Some(stored)))
}
