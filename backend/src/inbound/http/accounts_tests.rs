//! Tests for account HTTP handlers.

use super::*;
use crate::domain::TRACE_ID_HEADER;
use crate::inbound::http::test_utils::test_app;
use crate::test_support::InMemoryBackend;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

fn registration(password: &str, confirmation: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "username": "ada",
        "email": "ada@example.com",
        "password": password,
        "confirmPassword": confirmation,
        "userType": "chef"
    })
}

#[fixture]
fn backend() -> InMemoryBackend {
    InMemoryBackend::default()
}

async fn post_json(backend: &InMemoryBackend, uri: &str, body: Value) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(backend)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request(),
    )
    .await;
    let status = res.status();
    (status, actix_test::read_body_json(res).await)
}

async fn get_with_token(
    backend: &InMemoryBackend,
    uri: &str,
    token: Option<&str>,
) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(test_app(backend)).await;
    let mut req = actix_test::TestRequest::get().uri(uri);
    if let Some(token) = token {
        req = req.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    actix_test::call_service(&app, req.to_request()).await
}

#[rstest]
#[actix_web::test]
async fn mismatched_passwords_are_rejected(backend: InMemoryBackend) {
    let (status, body) = post_json(&backend, "/create_user", registration("a", "b")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Passwords do not match");
    assert!(backend.users().is_empty());
}

#[rstest]
#[actix_web::test]
async fn registration_creates_the_profile(backend: InMemoryBackend) {
    let (status, body) = post_json(&backend, "/create_user", registration("s3cret", "s3cret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["user_metadata"]["full_name"], "Ada Lovelace");
    assert!(body["session"]["access_token"].is_string());
    let users = backend.users();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username.as_deref(), Some("ada"));
}

#[rstest]
#[actix_web::test]
async fn unknown_usernames_are_not_found(backend: InMemoryBackend) {
    let (status, body) = post_json(
        &backend,
        "/sign_in",
        json!({"username": "nobody", "password": "whatever"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn wrong_passwords_are_unauthorised(backend: InMemoryBackend) {
    post_json(&backend, "/create_user", registration("s3cret", "s3cret")).await;
    let (status, body) = post_json(
        &backend,
        "/sign_in",
        json!({"username": "ada", "password": "guess"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid login credentials");
}

#[rstest]
#[actix_web::test]
async fn signed_in_tokens_open_the_protected_route(backend: InMemoryBackend) {
    post_json(&backend, "/create_user", registration("s3cret", "s3cret")).await;
    let (status, session) = post_json(
        &backend,
        "/sign_in",
        json!({"username": "ada", "password": "s3cret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = session["access_token"].as_str().expect("token");
    let user_id = session["user"]["id"].as_str().expect("user id");

    let res = get_with_token(&backend, "/protected", Some(token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: ProtectedResponse = actix_test::read_body_json(res).await;
    assert_eq!(body.message, format!("Welcome, user {user_id}!"));
    assert_eq!(body.payload.sub, user_id);
}

#[rstest]
#[case(None)]
#[case(Some("not-a-session"))]
#[actix_web::test]
async fn protected_route_rejects_missing_or_bad_tokens(
    backend: InMemoryBackend,
    #[case] token: Option<&str>,
) {
    let res = get_with_token(&backend, "/protected", token).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], header);
}

#[rstest]
#[actix_web::test]
async fn sign_out_revokes_the_session(backend: InMemoryBackend) {
    let token = backend.issue_token(crate::domain::UserId::random());

    let res = get_with_token(&backend, "/sign_out", Some(&token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: MessageResponse = actix_test::read_body_json(res).await;
    assert_eq!(body.message, "Signed out");

    let res = get_with_token(&backend, "/protected", Some(&token)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn sign_out_without_a_token_is_a_no_op(backend: InMemoryBackend) {
    let res = get_with_token(&backend, "/sign_out", None).await;
    assert_eq!(res.status(), StatusCode::OK);
}
