//! Recipe publication handler.
//!
//! ```text
//! POST /create_recipe?user_id=<uuid>
//! Content-Type: multipart/form-data
//!   image=<file>  title=Pasta  description=...  recipe_tags=vegan
//!   recipe_tags=quick  steps=Boil water | Add pasta | Drain
//! ```
//!
//! The whole form is read and validated before the creation port is called,
//! so a malformed request never touches storage or the store.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{HttpResponse, post, web};
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::CreateRecipeRequest;
use crate::domain::{Error, RecipeDraft, RecipeImage, StepInstructions};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CreatedRecipeResponse, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, map_image_validation_error, map_recipe_validation_error,
    map_steps_error, missing_field_error, parse_user_id,
};

const USER_ID: FieldName = FieldName::new("user_id");
const IMAGE: FieldName = FieldName::new("image");
const TITLE: FieldName = FieldName::new("title");
const STEPS: FieldName = FieldName::new("steps");
const DESCRIPTION: FieldName = FieldName::new("description");
const RECIPE_TAGS: FieldName = FieldName::new("recipe_tags");

/// Largest accepted image upload.
pub(crate) const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
/// Largest accepted text field, also applied to ignored fields.
pub(crate) const MAX_TEXT_BYTES: usize = 64 * 1024;

/// OpenAPI description of the multipart creation form.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateRecipeForm {
    /// Owner of the recipe; may be sent as a query parameter instead.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    user_id: Option<String>,
    /// Image file; the filename must carry an extension.
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    #[schema(example = "Pasta")]
    title: String,
    description: Option<String>,
    /// Repeat the field once per tag.
    #[schema(example = json!(["vegan", "quick"]))]
    recipe_tags: Vec<String>,
    /// Instructions separated by `|`; `\|` is a literal bar.
    #[schema(example = "Boil water | Add pasta | Drain")]
    steps: String,
}

/// Optional query string carrying the owner id.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRecipeQuery {
    pub user_id: Option<String>,
}

#[derive(Debug)]
struct UploadedImage {
    filename: String,
    bytes: Vec<u8>,
}

/// Raw form values as received, before validation.
#[derive(Debug, Default)]
struct RawRecipeForm {
    user_id: Option<String>,
    image: Option<UploadedImage>,
    title: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
    steps: Option<String>,
}

impl RawRecipeForm {
    fn into_request(self, query_user_id: Option<String>) -> Result<CreateRecipeRequest, Error> {
        let raw_user_id = self
            .user_id
            .or(query_user_id)
            .ok_or_else(|| missing_field_error(USER_ID))?;
        let user_id = parse_user_id(raw_user_id.trim(), USER_ID)?;

        let image = self.image.ok_or_else(|| missing_field_error(IMAGE))?;
        let image =
            RecipeImage::try_new(&image.filename, image.bytes).map_err(map_image_validation_error)?;

        let title = self.title.ok_or_else(|| missing_field_error(TITLE))?;
        let description = self.description.unwrap_or_default();
        let draft = RecipeDraft::try_new(&title, &description, self.tags)
            .map_err(map_recipe_validation_error)?;

        let steps = self.steps.ok_or_else(|| missing_field_error(STEPS))?;
        let steps = StepInstructions::parse(&steps).map_err(map_steps_error)?;

        Ok(CreateRecipeRequest {
            user_id,
            image,
            draft,
            steps,
        })
    }
}

fn map_multipart_error(err: MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart body: {err}"))
}

async fn read_field(field: &mut Field, name: FieldName, limit: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(map_multipart_error)?;
        if bytes.len() + chunk.len() > limit {
            return Err(invalid_field_error(
                name,
                format!("{} exceeds {limit} bytes", name.as_str()),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_text(field: &mut Field, name: FieldName) -> Result<String, Error> {
    let bytes = read_field(field, name, MAX_TEXT_BYTES).await?;
    String::from_utf8(bytes).map_err(|_| {
        invalid_field_error(name, format!("{} must be UTF-8 text", name.as_str()))
    })
}

async fn read_form(mut payload: Multipart) -> Result<RawRecipeForm, Error> {
    let mut form = RawRecipeForm::default();
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(map_multipart_error)?;
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "image" => {
                if form.image.is_some() {
                    return Err(invalid_field_error(IMAGE, "only one image may be uploaded"));
                }
                let filename = field
                    .content_disposition()
                    .and_then(|disposition| disposition.get_filename())
                    .unwrap_or_default()
                    .to_owned();
                let bytes = read_field(&mut field, IMAGE, MAX_IMAGE_BYTES).await?;
                form.image = Some(UploadedImage { filename, bytes });
            }
            "user_id" => form.user_id = Some(read_text(&mut field, USER_ID).await?),
            "title" => form.title = Some(read_text(&mut field, TITLE).await?),
            "description" => form.description = Some(read_text(&mut field, DESCRIPTION).await?),
            "recipe_tags" | "recipe_tags[]" => {
                form.tags.push(read_text(&mut field, RECIPE_TAGS).await?);
            }
            "steps" => form.steps = Some(read_text(&mut field, STEPS).await?),
            other => {
                debug!(field = other, "ignoring unknown form field");
                read_field(&mut field, FieldName::new("unknown"), MAX_TEXT_BYTES).await?;
            }
        }
    }
    Ok(form)
}

/// Publish a recipe: upload its image, then create the recipe and its steps.
#[utoipa::path(
    post,
    path = "/create_recipe",
    params(("user_id" = Option<String>, Query, description = "Owner id when not sent as a form field")),
    request_body(content = CreateRecipeForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Recipe and steps created", body = CreatedRecipeResponse),
        (status = 400, description = "Invalid form", body = ErrorSchema),
        (status = 404, description = "User Not Found.", body = ErrorSchema),
        (status = 500, description = "Upload, insert or step creation failed", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/create_recipe")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    query: web::Query<CreateRecipeQuery>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let form = read_form(payload).await?;
    let request = form.into_request(query.into_inner().user_id)?;
    let created = state.recipe_creation.create_recipe(request).await?;
    Ok(HttpResponse::Created().json(CreatedRecipeResponse::from(created)))
}

#[cfg(test)]
#[path = "recipe_creation_tests.rs"]
mod tests;
