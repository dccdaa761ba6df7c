//! Integration tests for the cohort API.
//!
//! These drive the public router and roster functions the way a client
//! would and check the documented behavior of every endpoint.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use cohort_api::api::{cors_layer, create_app, AppState};
use cohort_api::config::{Config, WriteMode};
use cohort_api::models::{seed, NewUser};
use cohort_api::roster;

fn state(mode: WriteMode) -> (AppState, Config) {
    let config = Config {
        write_mode: mode,
        ..Config::default()
    };
    (AppState::seeded(&config).unwrap(), config)
}

async fn call(
    state: &AppState,
    config: &Config,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let app = create_app(state.clone(), cors_layer(config).unwrap());
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn every_seed_record_is_reachable_by_id() {
    let (state, config) = state(WriteMode::Echo);

    for student in seed::students() {
        let uri = format!("/student/{}", student.id);
        let (status, body) = call(&state, &config, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::to_value(&student).unwrap());
    }

    for user in seed::users() {
        let uri = format!("/user/{}", user.id);
        let (status, body) = call(&state, &config, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::to_value(&user).unwrap());
    }
}

#[tokio::test]
async fn absent_ids_return_documented_errors() {
    let (state, config) = state(WriteMode::Echo);

    let (status, body) = call(&state, &config, Method::GET, "/student/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "student not found" }));

    let (status, body) = call(&state, &config, Method::GET, "/user/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "user not found" }));
}

#[tokio::test]
async fn echo_mode_writes_leave_collections_unchanged() {
    let (state, config) = state(WriteMode::Echo);

    let student = json!({ "name": "Ana" });
    let (status, _) = call(&state, &config, Method::POST, "/student", Some(student)).await;
    assert_eq!(status, StatusCode::OK);
    let update = json!({ "id": 1, "name": "X" });
    let (status, _) = call(&state, &config, Method::PUT, "/student", Some(update)).await;
    assert_eq!(status, StatusCode::OK);

    let fresh = json!({ "name": "Ana", "age": 22, "email": "ana@example.com" });
    let (status, body) = call(&state, &config, Method::POST, "/user", Some(fresh.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "user": fresh }));

    let (_, students) = call(&state, &config, Method::GET, "/students", None).await;
    assert_eq!(students["total"], 4);
    assert_eq!(students["data"], serde_json::to_value(seed::students()).unwrap());

    let (_, users) = call(&state, &config, Method::GET, "/users", None).await;
    assert_eq!(users, serde_json::to_value(seed::users()).unwrap());
}

#[tokio::test]
async fn duplicate_seed_email_is_rejected_whatever_the_other_fields() {
    let (state, _) = state(WriteMode::Echo);

    for (name, age) in [("John", 30), ("Someone", 1), ("", 200)] {
        let body = NewUser {
            name: Some(json!(name)),
            age: Some(json!(age)),
            email: Some(json!("john@example.com")),
        };
        let err = roster::create_user(state.users.as_ref(), state.write_mode, body).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn user_list_is_identical_across_calls() {
    let (state, config) = state(WriteMode::Echo);
    let (_, first) = call(&state, &config, Method::GET, "/users", None).await;
    let (_, second) = call(&state, &config, Method::GET, "/users", None).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn persist_mode_round_trip_through_the_api() {
    let (state, config) = state(WriteMode::Persist);

    let student = json!({ "name": "Ana" });
    let (status, body) = call(&state, &config, Method::POST, "/student", Some(student)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"], json!({ "id": 5, "name": "Ana" }));

    let rename = json!({ "id": 5, "name": "Ana Maria" });
    let (status, _) = call(&state, &config, Method::PUT, "/student", Some(rename)).await;
    assert_eq!(status, StatusCode::OK);

    let unknown = json!({ "id": 50, "name": "Nobody" });
    let (status, body) = call(&state, &config, Method::PUT, "/student", Some(unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "student not found" }));

    let (_, students) = call(&state, &config, Method::GET, "/students", None).await;
    assert_eq!(students["total"], 5);
    assert_eq!(students["data"][4], json!({ "id": 5, "name": "Ana Maria" }));

    let user = json!({ "name": "Ana", "age": 22, "email": "ana@example.com" });
    let (status, _) = call(&state, &config, Method::POST, "/user", Some(user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = call(&state, &config, Method::POST, "/user", Some(user)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "email already registered to a user" }));
}

#[tokio::test]
async fn echo_mode_accepts_fields_of_any_json_type() {
    let (state, config) = state(WriteMode::Echo);

    for user in [
        json!({ "name": "Ana", "age": "30", "email": "a@x.com" }),
        json!({ "name": "Ana", "age": 30.5, "email": "a@x.com" }),
        json!({ "name": 1, "age": [30], "email": { "at": "x.com" } }),
    ] {
        let (status, body) = call(&state, &config, Method::POST, "/user", Some(user.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "user": user }));
    }

    let student = json!({ "name": 7 });
    let (status, body) = call(&state, &config, Method::POST, "/student", Some(student)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "student create received" }));

    let (_, users) = call(&state, &config, Method::GET, "/users", None).await;
    assert_eq!(users, serde_json::to_value(seed::users()).unwrap());
}

#[tokio::test]
async fn persist_mode_rejects_unstorable_types() {
    let (state, config) = state(WriteMode::Persist);

    let user = json!({ "name": "Ana", "age": "30", "email": "a@x.com" });
    let (status, body) = call(&state, &config, Method::POST, "/user", Some(user)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "age must be an integer" }));

    let (_, users) = call(&state, &config, Method::GET, "/users", None).await;
    assert_eq!(users.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn post_bodies_are_read_without_content_type() {
    let (state, config) = state(WriteMode::Echo);

    for (uri, body, expected) in [
        ("/student", r#"{"name": "Ana"}"#, StatusCode::OK),
        (
            "/user",
            r#"{"name": "Ana", "age": 22, "email": "ana@example.com"}"#,
            StatusCode::CREATED,
        ),
    ] {
        let app = create_app(state.clone(), cors_layer(&config).unwrap());
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), expected, "POST {uri}");
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (state, config) = state(WriteMode::Echo);
    let (status, body) = call(&state, &config, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/user/{id}"]["get"].is_object());
}
