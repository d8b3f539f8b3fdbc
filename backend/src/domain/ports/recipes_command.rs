//! Driving port for recipe mutations other than creation.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeId, RecipeUpdate};

/// Domain use-case port for editing and removing recipes.
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Overwrite the editable fields of a recipe, returning updated rows.
    async fn update_recipe(
        &self,
        id: RecipeId,
        update: RecipeUpdate,
    ) -> Result<Vec<Recipe>, Error>;

    /// Delete a recipe. Succeeds whether or not a row matched.
    async fn delete_recipe(&self, id: RecipeId) -> Result<(), Error>;
}
