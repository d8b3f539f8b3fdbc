//! User listing, profile update and deletion handlers.
//!
//! ```text
//! GET /users
//! POST /users/recipes?user_id=<uuid>
//! PUT /users/{id} {"firstName":"Ada","lastName":"Lovelace",...}
//! DELETE /users/{id}   (Authorization: Bearer <token>)
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{UserProfileUpdate, full_name};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, RecipeWithStepsResponse, UserResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_user_id};

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub user_type: String,
}

impl From<UserUpdateRequest> for UserProfileUpdate {
    fn from(value: UserUpdateRequest) -> Self {
        Self {
            full_name: full_name(&value.first_name, &value.last_name),
            username: value.username,
            email: value.email,
            user_type: value.user_type,
        }
    }
}

/// Query string for `POST /users/recipes`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserRecipesQuery {
    /// Owner whose recipes are listed.
    pub user_id: Option<String>,
}

/// List every user row.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users, possibly none", body = [UserResponse]),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// List a user's recipes with their steps embedded.
#[utoipa::path(
    post,
    path = "/users/recipes",
    params(UserRecipesQuery),
    responses(
        (status = 200, description = "Recipes with ordered steps", body = [RecipeWithStepsResponse]),
        (status = 400, description = "Missing or malformed user id", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUserRecipes"
)]
#[post("/users/recipes")]
pub async fn list_user_recipes(
    state: web::Data<HttpState>,
    query: web::Query<UserRecipesQuery>,
) -> ApiResult<web::Json<Vec<RecipeWithStepsResponse>>> {
    const USER_ID: FieldName = FieldName::new("user_id");
    let raw = query
        .into_inner()
        .user_id
        .ok_or_else(|| missing_field_error(USER_ID))?;
    let user_id = parse_user_id(&raw, USER_ID)?;
    let recipes = state.users.list_user_recipes(&user_id).await?;
    Ok(web::Json(
        recipes
            .into_iter()
            .map(RecipeWithStepsResponse::from)
            .collect(),
    ))
}

/// Overwrite a user's profile columns.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "Updated rows, possibly empty", body = [UserResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserUpdateRequest>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let id = parse_user_id(&path, FieldName::new("id"))?;
    let updated = state
        .users_command
        .update_user(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(
        updated.into_iter().map(UserResponse::from).collect(),
    ))
}

/// Delete a user's row and their identity-provider account.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted rows", body = [UserResponse]),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Store or identity provider failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser",
    security(("bearer" = []))
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let id = parse_user_id(&path, FieldName::new("id"))?;
    info!(caller = %caller.claims().sub, user_id = %id, "deleting user");
    let deleted = state.users_command.delete_user(&id).await?;
    Ok(web::Json(
        deleted.into_iter().map(UserResponse::from).collect(),
    ))
}
