//! Recipe creation workflow.
//!
//! Publishing a recipe chains four collaborators: the user lookup, the image
//! upload, the recipe insert and the batched step insert. Any failure aborts
//! the remaining calls. Only a failed step insert is compensated, by deleting
//! the recipe row that was just created; the uploaded image is never removed.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CreateRecipeRequest, ImageStorage, ImageStorageError, RecipeCreation, RecipeRepository,
    RecipeRepositoryError, StepRepository, StepRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{Error, IMAGE_CONTENT_TYPE, RECIPE_IMAGE_BUCKET, RecipeId, RecipeWithSteps};

fn map_user_lookup_error(error: UserRepositoryError) -> Error {
    Error::upstream(format!("user lookup failed: {error}"))
}

fn map_upload_error(error: ImageStorageError) -> Error {
    Error::upload_failed(format!("Error Uploading Image: {error}"))
}

fn map_recipe_insert_error(error: RecipeRepositoryError) -> Error {
    Error::recipe_create_failed(format!("Error creating recipe: {error}"))
}

/// Why the batched step insert is treated as failed.
enum StepInsertFailure {
    Repository(StepRepositoryError),
    Incomplete { sent: usize, stored: usize },
}

impl std::fmt::Display for StepInsertFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repository(err) => write!(f, "{err}"),
            Self::Incomplete { sent, stored } => {
                write!(f, "store returned {stored} of {sent} step rows")
            }
        }
    }
}

/// Service implementing [`RecipeCreation`] over the driven ports.
#[derive(Clone)]
pub struct RecipeCreationService<U, I, R, S> {
    users: Arc<U>,
    images: Arc<I>,
    recipes: Arc<R>,
    steps: Arc<S>,
    bucket: String,
}

impl<U, I, R, S> RecipeCreationService<U, I, R, S> {
    /// Create the service, uploading to the default recipe image bucket.
    pub fn new(users: Arc<U>, images: Arc<I>, recipes: Arc<R>, steps: Arc<S>) -> Self {
        Self {
            users,
            images,
            recipes,
            steps,
            bucket: RECIPE_IMAGE_BUCKET.to_owned(),
        }
    }

    /// Upload images to `bucket` instead of the default.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }
}

impl<U, I, R, S> RecipeCreationService<U, I, R, S>
where
    R: RecipeRepository,
{
    /// Delete the recipe row after a failed step insert.
    ///
    /// Returns whether the delete succeeded; a failure is logged and never
    /// replaces the step error.
    async fn roll_back(&self, recipe_id: RecipeId) -> bool {
        match self.recipes.delete(recipe_id).await {
            Ok(_) => {
                warn!(recipe_id = %recipe_id, "recipe removed after step insert failure");
                true
            }
            Err(err) => {
                error!(
                    recipe_id = %recipe_id,
                    error = %err,
                    "failed to remove recipe after step insert failure"
                );
                false
            }
        }
    }
}

#[async_trait]
impl<U, I, R, S> RecipeCreation for RecipeCreationService<U, I, R, S>
where
    U: UserRepository,
    I: ImageStorage,
    R: RecipeRepository,
    S: StepRepository,
{
    async fn create_recipe(&self, request: CreateRecipeRequest) -> Result<RecipeWithSteps, Error> {
        let CreateRecipeRequest {
            user_id,
            image,
            draft,
            steps,
        } = request;

        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_lookup_error)?
            .ok_or_else(|| Error::not_found("User Not Found."))?;

        let path = image.storage_path(&user_id, draft.title());
        self.images
            .upload(&self.bucket, &path, image.bytes(), IMAGE_CONTENT_TYPE)
            .await
            .map_err(map_upload_error)?;
        let image_url = self.images.public_url(&self.bucket, &path);

        let new_recipe = draft.into_new_recipe(user_id, image_url);
        let inserted = self.recipes.insert(&new_recipe).await;
        let recipe = match inserted {
            Ok(Some(recipe)) => recipe,
            Ok(None) => {
                warn!(image_path = %path, "recipe insert returned no row; image left orphaned");
                return Err(Error::recipe_create_failed(
                    "Error creating recipe: store returned no row",
                ));
            }
            Err(err) => {
                warn!(image_path = %path, error = %err, "recipe insert failed; image left orphaned");
                return Err(map_recipe_insert_error(err));
            }
        };

        let new_steps = steps.into_new_steps(recipe.id);
        let failure = match self.steps.insert_batch(&new_steps).await {
            Ok(mut stored) if stored.len() >= new_steps.len() => {
                stored.sort_by_key(|step| step.step_number);
                info!(
                    recipe_id = %recipe.id,
                    steps = stored.len(),
                    "recipe created"
                );
                return Ok(RecipeWithSteps {
                    recipe,
                    steps: stored,
                });
            }
            Ok(stored) => StepInsertFailure::Incomplete {
                sent: new_steps.len(),
                stored: stored.len(),
            },
            Err(err) => StepInsertFailure::Repository(err),
        };

        let rolled_back = self.roll_back(recipe.id).await;
        Err(
            Error::steps_create_failed(format!("error creating steps: {failure}")).with_details(
                json!({
                    "recipeId": recipe.id.get(),
                    "rolledBack": rolled_back,
                }),
            ),
        )
    }
}

#[cfg(test)]
#[path = "recipe_creation_service_tests.rs"]
mod tests;
