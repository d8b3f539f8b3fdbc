//! Driving port for recipe reads.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeId, Step};

/// Domain use-case port for browsing recipes.
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// Every recipe; an empty store is reported as not found.
    async fn list_recipes(&self) -> Result<Vec<Recipe>, Error>;

    /// One recipe by id.
    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, Error>;

    /// Steps of a recipe in ascending order.
    async fn list_steps(&self, id: RecipeId) -> Result<Vec<Step>, Error>;

    /// First recipe with exactly this name.
    async fn find_by_name(&self, name: &str) -> Result<Recipe, Error>;
}
