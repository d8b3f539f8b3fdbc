//! Port for the recipes table.

use async_trait::async_trait;

use crate::domain::{NewRecipe, Recipe, RecipeId, RecipeUpdate, RecipeWithSteps, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// The store rejected the request or returned an unreadable body.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

/// Port for reading and writing recipe rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert one recipe and return the stored row.
    ///
    /// `Ok(None)` means the store accepted the request but returned no row.
    async fn insert(&self, recipe: &NewRecipe) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Delete a recipe by id, returning the deleted rows.
    async fn delete(&self, id: RecipeId) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Every recipe row.
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// The recipe with `id`, if any.
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// The first recipe whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Apply `update` to the recipe with `id`, returning the updated rows.
    async fn update(
        &self,
        id: RecipeId,
        update: &RecipeUpdate,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Recipes owned by `user_id`, each with its steps ordered by number.
    async fn list_with_steps_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RecipeWithSteps>, RecipeRepositoryError>;
}
