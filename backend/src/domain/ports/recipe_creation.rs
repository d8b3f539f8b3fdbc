//! Driving port for publishing a recipe with its image and steps.

use async_trait::async_trait;

use crate::domain::{Error, RecipeDraft, RecipeImage, RecipeWithSteps, StepInstructions, UserId};

/// Fully validated creation request assembled by an inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecipeRequest {
    /// Owner of the new recipe.
    pub user_id: UserId,
    /// Uploaded image.
    pub image: RecipeImage,
    /// Title, description and tags.
    pub draft: RecipeDraft,
    /// Parsed step instructions.
    pub steps: StepInstructions,
}

/// Domain use-case port for recipe creation.
#[async_trait]
pub trait RecipeCreation: Send + Sync {
    /// Upload the image, insert the recipe and insert its numbered steps.
    async fn create_recipe(&self, request: CreateRecipeRequest) -> Result<RecipeWithSteps, Error>;
}
