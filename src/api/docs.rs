//! OpenAPI document and the sitemap derived from it.

use utoipa::openapi::path::PathItem;
use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa::OpenApi;

use super::handlers;
use crate::error::ErrorBody;
use crate::models::{
    CohortInfo, CreatedUser, NewStudent, NewUser, Student, StudentAck, StudentList, StudentUpdate,
    User, UserEcho,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "cohort-api", description = "Students and users of a teaching cohort"),
    paths(
        handlers::sitemap,
        handlers::health,
        handlers::info,
        handlers::list_students,
        handlers::get_student,
        handlers::create_student,
        handlers::update_student,
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
    ),
    components(schemas(
        CohortInfo,
        Student,
        StudentList,
        NewStudent,
        StudentUpdate,
        StudentAck,
        User,
        NewUser,
        UserEcho,
        CreatedUser,
        ErrorBody,
        handlers::Sitemap,
    )),
    tags(
        (name = "service", description = "Service endpoints"),
        (name = "cohort", description = "Cohort information"),
        (name = "students", description = "Student roster"),
        (name = "users", description = "Registered users"),
    )
)]
struct ApiDoc;

/// Full OpenAPI document.
pub fn openapi() -> OpenApiDoc {
    ApiDoc::openapi()
}

fn methods(item: &PathItem) -> impl Iterator<Item = &'static str> {
    [
        ("GET", item.get.is_some()),
        ("POST", item.post.is_some()),
        ("PUT", item.put.is_some()),
        ("PATCH", item.patch.is_some()),
        ("DELETE", item.delete.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, present)| present.then_some(name))
}

/// Documented endpoints as `"<METHOD> <path>"`, sorted by path, then GET,
/// POST, PUT, PATCH, DELETE.
pub fn endpoints() -> Vec<String> {
    openapi()
        .paths
        .paths
        .iter()
        .flat_map(|(path, item)| methods(item).map(move |method| format!("{method} {path}")))
        .collect()
}
