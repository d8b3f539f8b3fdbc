//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every handler in the inbound HTTP layer plus the health probes
//! - **Schemas**: request and response payloads together with the domain
//!   error wrappers ([`ErrorSchema`], [`ErrorCodeSchema`])
//! - **Security**: the bearer access-token scheme used by protected routes
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::accounts::{
    AccountResponse, CreateUserRequest, ProtectedResponse, SessionResponse, SignInRequest,
    SignUpResponse,
};
use crate::inbound::http::recipe_creation::CreateRecipeForm;
use crate::inbound::http::recipes::RecipeUpdateRequest;
use crate::inbound::http::schemas::{
    CreatedRecipeResponse, ErrorCodeSchema, ErrorSchema, MessageResponse, RecipeResponse,
    RecipeWithStepsResponse, StepResponse, UserResponse,
};
use crate::inbound::http::users::UserUpdateRequest;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /sign_in."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipes backend API",
        description = "HTTP interface for publishing and browsing recipes, managing user profiles and signing in."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::list_recipe_steps,
        crate::inbound::http::recipes::get_recipe_by_name,
        crate::inbound::http::recipe_creation::create_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::list_user_recipes,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::accounts::create_user,
        crate::inbound::http::accounts::sign_in,
        crate::inbound::http::accounts::sign_out,
        crate::inbound::http::accounts::protected,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RecipeResponse,
        StepResponse,
        RecipeWithStepsResponse,
        CreatedRecipeResponse,
        CreateRecipeForm,
        RecipeUpdateRequest,
        UserResponse,
        UserUpdateRequest,
        MessageResponse,
        CreateUserRequest,
        SignInRequest,
        AccountResponse,
        SessionResponse,
        SignUpResponse,
        ProtectedResponse,
    )),
    tags(
        (name = "recipes", description = "Publishing and browsing recipes"),
        (name = "users", description = "User profiles and their recipes"),
        (name = "accounts", description = "Registration, sign-in and sessions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_exposes_code_message_and_trace_id() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn recipe_schema_uses_the_store_column_name() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let recipe = schemas.get("RecipeResponse").expect("RecipeResponse schema");

        assert_object_schema_has_field(recipe, "recipe-name");
        assert_object_schema_has_field(recipe, "image_tags");
    }

    #[rstest]
    #[case("/recipes")]
    #[case("/recipes/{id}")]
    #[case("/recipes/{id}/steps")]
    #[case("/recipes/name/{name}")]
    #[case("/create_recipe")]
    #[case("/update_recipe/{id}")]
    #[case("/delete_recipe/{id}")]
    #[case("/users")]
    #[case("/users/recipes")]
    #[case("/users/{id}")]
    #[case("/create_user")]
    #[case("/sign_in")]
    #[case("/sign_out")]
    #[case("/protected")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
