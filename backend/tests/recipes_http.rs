//! End-to-end recipe flows through the HTTP surface and the in-memory backend.

mod support;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use recipes_backend::domain::{RECIPE_IMAGE_BUCKET, TRACE_ID_HEADER, UserProfile};
use recipes_backend::test_support::InMemoryBackend;
use support::http_app::{BOUNDARY, Part, app, backend_with_cook, multipart_body};

#[fixture]
fn cook() -> (InMemoryBackend, UserProfile) {
    backend_with_cook()
}

async fn publish(backend: &InMemoryBackend, owner: &str, title: &str, steps: &str) -> Value {
    let service = actix_test::init_service(app(backend)).await;
    let parts = [
        Part::Text("user_id", owner),
        Part::File("image", "photo.jpg", b"\xff\xd8\xff"),
        Part::Text("title", title),
        Part::Text("description", "Family favourite"),
        Part::Text("recipe_tags", "dinner"),
        Part::Text("recipe_tags", "vegetarian"),
        Part::Text("steps", steps),
    ];
    let res = actix_test::call_service(
        &service,
        actix_test::TestRequest::post()
            .uri("/create_recipe")
            .insert_header((
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(&parts))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    actix_test::read_body_json(res).await
}

async fn get(backend: &InMemoryBackend, uri: &str) -> (StatusCode, Value) {
    let service = actix_test::init_service(app(backend)).await;
    let res =
        actix_test::call_service(&service, actix_test::TestRequest::get().uri(uri).to_request())
            .await;
    let status = res.status();
    (status, actix_test::read_body_json(res).await)
}

#[rstest]
#[actix_web::test]
async fn published_recipes_read_back_with_tags_and_ordered_steps(
    cook: (InMemoryBackend, UserProfile),
) {
    let (backend, profile) = cook;
    let owner = profile.id.to_string();
    let created = publish(&backend, &owner, "Risotto", "Toast rice | Add stock \\| wine | Stir").await;
    let id = created["recipe"]["id"].as_i64().expect("recipe id");

    let (status, recipe) = get(&backend, &format!("/recipes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recipe["recipe-name"], "Risotto");
    assert_eq!(recipe["image_tags"], json!(["dinner", "vegetarian"]));
    assert_eq!(recipe["user_id"], owner.as_str());

    let (status, by_name) = get(&backend, "/recipes/name/Risotto").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_name["id"], id);

    let (status, steps) = get(&backend, &format!("/recipes/{id}/steps")).await;
    assert_eq!(status, StatusCode::OK);
    let instructions: Vec<&str> = steps
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["instruction"].as_str().expect("instruction"))
        .collect();
    assert_eq!(instructions, vec!["Toast rice", "Add stock | wine", "Stir"]);

    let path = format!("recipes/{owner}/Risotto.jpg");
    assert!(backend.object(RECIPE_IMAGE_BUCKET, &path).is_some());
}

#[rstest]
#[actix_web::test]
async fn user_recipes_embed_their_steps(cook: (InMemoryBackend, UserProfile)) {
    let (backend, profile) = cook;
    let owner = profile.id.to_string();
    publish(&backend, &owner, "Soup", "Chop | Simmer").await;
    publish(&backend, &owner, "Salad", "Wash | Toss | Dress").await;

    let service = actix_test::init_service(app(&backend)).await;
    let res = actix_test::call_service(
        &service,
        actix_test::TestRequest::post()
            .uri(&format!("/users/recipes?user_id={owner}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    let recipes = body.as_array().expect("recipes array");
    assert_eq!(recipes.len(), 2);
    for recipe in recipes {
        let numbers: Vec<u64> = recipe["steps"]
            .as_array()
            .expect("steps")
            .iter()
            .map(|step| step["step_number"].as_u64().expect("number"))
            .collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
        assert_eq!(numbers.first(), Some(&1));
    }
}

#[rstest]
#[actix_web::test]
async fn deleted_recipes_disappear(cook: (InMemoryBackend, UserProfile)) {
    let (backend, profile) = cook;
    let created = publish(&backend, &profile.id.to_string(), "Toast", "Slice | Toast").await;
    let id = created["recipe"]["id"].as_i64().expect("recipe id");

    let service = actix_test::init_service(app(&backend)).await;
    for _ in 0..2 {
        let res = actix_test::call_service(
            &service,
            actix_test::TestRequest::delete()
                .uri(&format!("/delete_recipe/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "Recipe Deleted Successfully.");
    }

    let (status, body) = get(&backend, &format!("/recipes/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Recipe not found");
}

#[rstest]
#[actix_web::test]
async fn failures_carry_the_inbound_trace_id() {
    let backend = InMemoryBackend::default();
    let trace_id = "6f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f";
    let service = actix_test::init_service(app(&backend)).await;
    let res = actix_test::call_service(
        &service,
        actix_test::TestRequest::get()
            .uri("/recipes")
            .insert_header((TRACE_ID_HEADER, trace_id))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(trace_id)
    );
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "No recipes found.");
    assert_eq!(body["traceId"], trace_id);
}
