//! Response payloads and OpenAPI schema definitions.
//!
//! Domain types remain framework-agnostic by not deriving `Serialize` or
//! `ToSchema`. Recipe, step and user payloads here mirror the store rows
//! column for column, including the hyphenated `recipe-name` column, so API
//! clients see rows as they are stored.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Recipe, RecipeWithSteps, Step, UserProfile};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The recipe image could not be stored.
    #[schema(rename = "upload_failed")]
    UploadFailed,
    /// The recipe row could not be created.
    #[schema(rename = "recipe_create_failed")]
    RecipeCreateFailed,
    /// The recipe steps could not be created.
    #[schema(rename = "steps_create_failed")]
    StepsCreateFailed,
    /// An external collaborator failed.
    #[schema(rename = "upstream_failed")]
    UpstreamFailed,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Recipe not found")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "5f0c7a8e-3c57-4b8e-9d4e-0b9c3f1a2d11")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// A row of the recipes table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponse {
    #[schema(example = 7)]
    pub id: i64,
    #[serde(rename = "recipe-name")]
    #[schema(example = "Pasta")]
    pub recipe_name: String,
    pub image_url: String,
    #[schema(example = json!(["vegan", "quick"]))]
    pub image_tags: Vec<String>,
    pub description: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(value: Recipe) -> Self {
        Self {
            id: value.id.get(),
            recipe_name: value.name,
            image_url: value.image_url,
            image_tags: value.tags,
            description: value.description,
            user_id: value.user_id.to_string(),
        }
    }
}

/// A row of the steps table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StepResponse {
    pub id: i64,
    pub recipe_id: i64,
    #[schema(example = 1)]
    pub step_number: u32,
    #[schema(example = "Boil water")]
    pub instruction: String,
}

impl From<Step> for StepResponse {
    fn from(value: Step) -> Self {
        Self {
            id: value.id,
            recipe_id: value.recipe_id.get(),
            step_number: value.step_number,
            instruction: value.instruction,
        }
    }
}

/// Recipe row with its steps embedded, ordered by step number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeWithStepsResponse {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    pub steps: Vec<StepResponse>,
}

impl From<RecipeWithSteps> for RecipeWithStepsResponse {
    fn from(value: RecipeWithSteps) -> Self {
        Self {
            recipe: value.recipe.into(),
            steps: value.steps.into_iter().map(StepResponse::from).collect(),
        }
    }
}

/// Body of `201 Created` for a newly published recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedRecipeResponse {
    pub recipe: RecipeResponse,
    pub steps: Vec<StepResponse>,
}

impl From<RecipeWithSteps> for CreatedRecipeResponse {
    fn from(value: RecipeWithSteps) -> Self {
        Self {
            recipe: value.recipe.into(),
            steps: value.steps.into_iter().map(StepResponse::from).collect(),
        }
    }
}

/// A row of the users table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub user_type: Option<String>,
}

impl From<UserProfile> for UserResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.id.to_string(),
            full_name: value.full_name,
            email: value.email,
            username: value.username,
            user_type: value.user_type,
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Recipe Deleted Successfully.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
