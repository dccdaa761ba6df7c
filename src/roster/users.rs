//! User lookup and creation.

use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{required_int, required_str};
use crate::config::WriteMode;
use crate::error::{ApiError, Result, StoreError};
use crate::metrics;
use crate::models::{CreatedUser, NewUser, User, UserEcho};
use crate::store::{Collection, RecordId, Repository};

/// All users in insertion order.
pub fn list_users(repo: &dyn Repository<User>) -> Result<Vec<User>> {
    Ok(repo.list()?)
}

/// User with the given id.
pub fn get_user(repo: &dyn Repository<User>, id: RecordId) -> Result<User> {
    repo.get_by_id(id)?.ok_or(ApiError::UserNotFound(id))
}

/// Handle `POST /user`.
///
/// Requires `name`, `age` and `email` to be present and non-null, and rejects
/// an email that already belongs to a stored user. The submitted values are
/// echoed as received. Only [`WriteMode::Persist`] checks their types and
/// inserts the record.
#[instrument(skip(repo, body))]
pub fn create_user(
    repo: &dyn Repository<User>,
    mode: WriteMode,
    body: NewUser,
) -> Result<CreatedUser> {
    let present = |field: Option<Value>| field.filter(|value| !value.is_null());
    let (Some(name), Some(age), Some(email)) =
        (present(body.name), present(body.age), present(body.email))
    else {
        warn!("Rejected user create with missing fields");
        metrics::inc_validation_failures(Collection::Users);
        return Err(ApiError::MissingFields("All fields required"));
    };

    if let Some(email) = email.as_str() {
        if repo.find(&|user: &User| user.email == email)?.is_some() {
            warn!(%email, "Rejected user create with registered email");
            metrics::inc_validation_failures(Collection::Users);
            return Err(ApiError::DuplicateEmail(email.to_string()));
        }
    }

    let id = match mode {
        WriteMode::Echo => None,
        WriteMode::Persist => {
            let record = User::new(
                0,
                required_str(&name, "name")?,
                required_int(&age, "age")?,
                required_str(&email, "email")?,
            );
            let stored = repo.insert(record).map_err(|e| match e {
                StoreError::DuplicateKey(email) => ApiError::DuplicateEmail(email),
                other => other.into(),
            })?;
            metrics::inc_records_written(Collection::Users);
            info!(id = stored.id, email = %stored.email, "Created user");
            Some(stored.id)
        }
    };

    Ok(CreatedUser {
        user: UserEcho {
            id,
            name,
            age,
            email,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed;
    use crate::store::InMemoryRepository;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn repo() -> InMemoryRepository<User> {
        InMemoryRepository::seeded(seed::users()).unwrap()
    }

    fn new_user(name: Option<&str>, age: Option<i64>, email: Option<&str>) -> NewUser {
        NewUser {
            name: name.map(Value::from),
            age: age.map(Value::from),
            email: email.map(Value::from),
        }
    }

    #[test]
    fn list_is_stable_across_calls() {
        let repo = repo();
        let first = list_users(&repo).unwrap();
        let second = list_users(&repo).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, seed::users());
    }

    #[test]
    fn get_returns_each_seed_record() {
        let repo = repo();
        for user in seed::users() {
            assert_eq!(get_user(&repo, user.id).unwrap(), user);
        }
        assert!(matches!(get_user(&repo, 4), Err(ApiError::UserNotFound(4))));
    }

    #[test]
    fn create_requires_every_field() {
        let repo = repo();
        let cases = [
            new_user(None, Some(20), Some("a@x.com")),
            new_user(Some("A"), None, Some("a@x.com")),
            new_user(Some("A"), Some(20), None),
            NewUser {
                age: Some(Value::Null),
                ..new_user(Some("A"), Some(20), Some("a@x.com"))
            },
        ];
        for body in cases {
            let err = create_user(&repo, WriteMode::Echo, body).unwrap_err();
            assert_eq!(err.to_string(), "All fields required");
        }
    }

    #[test]
    fn create_rejects_seed_email_regardless_of_other_fields() {
        let repo = repo();
        let err = create_user(
            &repo,
            WriteMode::Echo,
            new_user(Some("Someone Else"), Some(99), Some("john@example.com")),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::DuplicateEmail(ref e) if e == "john@example.com"));
    }

    #[test]
    fn echo_create_returns_fields_without_storing() {
        let repo = repo();
        let created = create_user(
            &repo,
            WriteMode::Echo,
            new_user(Some("Ana"), Some(22), Some("ana@example.com")),
        )
        .unwrap();

        assert_eq!(
            created.user,
            UserEcho {
                id: None,
                name: json!("Ana"),
                age: json!(22),
                email: json!("ana@example.com"),
            }
        );
        assert_eq!(repo.len().unwrap(), 3);
    }

    #[test]
    fn echo_create_echoes_values_of_any_type() {
        let repo = repo();
        let body = NewUser {
            name: Some(json!(["Ana"])),
            age: Some(json!("30")),
            email: Some(json!(42)),
        };
        let created = create_user(&repo, WriteMode::Echo, body).unwrap();

        assert_eq!(created.user.name, json!(["Ana"]));
        assert_eq!(created.user.age, json!("30"));
        assert_eq!(created.user.email, json!(42));
        assert_eq!(repo.len().unwrap(), 3);
    }

    #[test]
    fn persist_create_requires_storable_types() {
        let repo = repo();
        let body = NewUser {
            age: Some(json!(30.5)),
            ..new_user(Some("Ana"), None, Some("ana@example.com"))
        };
        let err = create_user(&repo, WriteMode::Persist, body).unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(ref msg) if msg == "age must be an integer"));
        assert_eq!(repo.len().unwrap(), 3);
    }

    #[test]
    fn persist_create_stores_and_then_rejects_same_email() {
        let repo = repo();
        let body = || new_user(Some("Ana"), Some(22), Some("ana@example.com"));

        let created = create_user(&repo, WriteMode::Persist, body()).unwrap();
        assert_eq!(created.user.id, Some(151));
        assert_eq!(repo.len().unwrap(), 4);
        assert_eq!(get_user(&repo, 151).unwrap().email, "ana@example.com");

        let err = create_user(&repo, WriteMode::Persist, body()).unwrap_err();
        assert!(matches!(err, ApiError::DuplicateEmail(_)));
        assert_eq!(repo.len().unwrap(), 4);
    }
}
