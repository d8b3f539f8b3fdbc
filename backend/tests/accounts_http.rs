//! Registration, sign-in and profile management through the HTTP surface.

mod support;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use recipes_backend::domain::UserId;
use recipes_backend::test_support::InMemoryBackend;
use support::http_app::app;

async fn send(
    backend: &InMemoryBackend,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let service = actix_test::init_service(app(backend)).await;
    let res = actix_test::call_service(&service, request.to_request()).await;
    let status = res.status();
    (status, actix_test::read_body_json(res).await)
}

#[rstest]
#[actix_web::test]
async fn a_new_account_can_sign_in_edit_and_delete_itself() {
    let backend = InMemoryBackend::default();

    let (status, _) = send(
        &backend,
        actix_test::TestRequest::post().uri("/create_user").set_json(json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "username": "grace",
            "email": "grace@example.com",
            "password": "cobol",
            "confirmPassword": "cobol",
            "userType": "home cook"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, session) = send(
        &backend,
        actix_test::TestRequest::post()
            .uri("/sign_in")
            .set_json(json!({"username": "grace", "password": "cobol"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = session["access_token"].as_str().expect("token").to_owned();
    let id = session["user"]["id"].as_str().expect("id").to_owned();

    let (status, updated) = send(
        &backend,
        actix_test::TestRequest::put()
            .uri(&format!("/users/{id}"))
            .set_json(json!({
                "firstName": "Grace",
                "lastName": "Murray Hopper",
                "username": "amazing-grace",
                "email": "grace@example.com",
                "userType": "chef"
            })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated[0]["full_name"], "Grace Murray Hopper");
    assert_eq!(updated[0]["username"], "amazing-grace");

    let (status, _) = send(
        &backend,
        actix_test::TestRequest::delete()
            .uri(&format!("/users/{id}"))
            .insert_header((AUTHORIZATION, format!("Bearer {token}"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(backend.users().is_empty());
    let user_id = UserId::new(&id).expect("uuid");
    assert!(!backend.has_identity(&user_id));
}

#[rstest]
#[case(json!({"username": "ghost", "password": "boo"}), StatusCode::NOT_FOUND)]
#[case(json!({"username": "", "password": "boo"}), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn sign_in_failures_map_to_statuses(#[case] body: Value, #[case] expected: StatusCode) {
    let backend = InMemoryBackend::default();
    let (status, error) = send(
        &backend,
        actix_test::TestRequest::post().uri("/sign_in").set_json(body),
    )
    .await;
    assert_eq!(status, expected);
    assert!(error["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn deleting_a_user_requires_a_bearer_token() {
    let backend = InMemoryBackend::default();
    let id = UserId::random();
    backend.add_user_named(id, "someone");

    let (status, body) = send(
        &backend,
        actix_test::TestRequest::delete().uri(&format!("/users/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(backend.users().len(), 1);
}
