//! Recipe read, update and delete handlers.
//!
//! ```text
//! GET /recipes
//! GET /recipes/{id}
//! GET /recipes/{id}/steps
//! GET /recipes/name/{name}
//! PUT /update_recipe/{id} {"recipe_name":"Pasta",...}
//! DELETE /delete_recipe/{id}
//! ```

use actix_web::{delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RecipeUpdate;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse, RecipeResponse, StepResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_recipe_id};

const RECIPE_ID_FIELD: FieldName = FieldName::new("id");

/// Request body for `PUT /update_recipe/{id}`.
///
/// `user_id` is accepted for compatibility but never written; ownership does
/// not change through an update.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecipeUpdateRequest {
    pub recipe_name: String,
    pub recipe_image: String,
    pub recipe_tags: Vec<String>,
    pub recipe_description: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl From<RecipeUpdateRequest> for RecipeUpdate {
    fn from(value: RecipeUpdateRequest) -> Self {
        Self {
            name: value.recipe_name,
            image_url: value.recipe_image,
            tags: value.recipe_tags,
            description: value.recipe_description,
        }
    }
}

/// List every recipe.
#[utoipa::path(
    get,
    path = "/recipes",
    responses(
        (status = 200, description = "All recipes", body = [RecipeResponse]),
        (status = 404, description = "No recipes found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let recipes = state.recipes.list_recipes().await?;
    Ok(web::Json(
        recipes.into_iter().map(RecipeResponse::from).collect(),
    ))
}

/// Fetch one recipe by id.
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "The recipe", body = RecipeResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let id = parse_recipe_id(&path, RECIPE_ID_FIELD)?;
    let recipe = state.recipes.get_recipe(id).await?;
    Ok(web::Json(recipe.into()))
}

/// List a recipe's steps in ascending step order.
#[utoipa::path(
    get,
    path = "/recipes/{id}/steps",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Ordered steps", body = [StepResponse]),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipeSteps"
)]
#[get("/recipes/{id}/steps")]
pub async fn list_recipe_steps(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<StepResponse>>> {
    let id = parse_recipe_id(&path, RECIPE_ID_FIELD)?;
    let steps = state.recipes.list_steps(id).await?;
    Ok(web::Json(steps.into_iter().map(StepResponse::from).collect()))
}

/// Fetch the first recipe with an exact name.
#[utoipa::path(
    get,
    path = "/recipes/name/{name}",
    params(("name" = String, Path, description = "Exact recipe name")),
    responses(
        (status = 200, description = "The recipe", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipeByName"
)]
#[get("/recipes/name/{name}")]
pub async fn get_recipe_by_name(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let recipe = state.recipes.find_by_name(&path).await?;
    Ok(web::Json(recipe.into()))
}

/// Overwrite a recipe's name, image URL, tags and description.
#[utoipa::path(
    put,
    path = "/update_recipe/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    request_body = RecipeUpdateRequest,
    responses(
        (status = 200, description = "Updated rows, possibly empty", body = [RecipeResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/update_recipe/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecipeUpdateRequest>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let id = parse_recipe_id(&path, RECIPE_ID_FIELD)?;
    let updated = state
        .recipes_command
        .update_recipe(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(
        updated.into_iter().map(RecipeResponse::from).collect(),
    ))
}

/// Delete a recipe; succeeds whether or not a row matched.
#[utoipa::path(
    delete,
    path = "/delete_recipe/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Deletion confirmed", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/delete_recipe/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_recipe_id(&path, RECIPE_ID_FIELD)?;
    state.recipes_command.delete_recipe(id).await?;
    Ok(web::Json(MessageResponse::new("Recipe Deleted Successfully.")))
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
