//! Recipe browse and edit services.
//!
//! Each operation is a single repository call whose outcome maps directly to
//! a response; empty reads where a resource was expected become not found.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    RecipeRepository, RecipeRepositoryError, RecipesCommand, RecipesQuery, StepRepository,
    StepRepositoryError,
};
use crate::domain::{Error, Recipe, RecipeId, RecipeUpdate, Step};

fn map_recipe_error(error: RecipeRepositoryError) -> Error {
    Error::upstream(error.to_string())
}

fn map_step_error(error: StepRepositoryError) -> Error {
    Error::upstream(error.to_string())
}

/// Service implementing the recipe query and command driving ports.
#[derive(Clone)]
pub struct RecipeService<R, S> {
    recipes: Arc<R>,
    steps: Arc<S>,
}

impl<R, S> RecipeService<R, S> {
    /// Create the service over the recipe and step repositories.
    pub fn new(recipes: Arc<R>, steps: Arc<S>) -> Self {
        Self { recipes, steps }
    }
}

#[async_trait]
impl<R, S> RecipesQuery for RecipeService<R, S>
where
    R: RecipeRepository,
    S: StepRepository,
{
    async fn list_recipes(&self) -> Result<Vec<Recipe>, Error> {
        let recipes = self.recipes.list_all().await.map_err(map_recipe_error)?;
        if recipes.is_empty() {
            return Err(Error::not_found("No recipes found."));
        }
        Ok(recipes)
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| Error::not_found(format!("Recipe {id} not found")))
    }

    async fn list_steps(&self, id: RecipeId) -> Result<Vec<Step>, Error> {
        let mut steps = self
            .steps
            .list_for_recipe(id)
            .await
            .map_err(map_step_error)?;
        if steps.is_empty() {
            return Err(Error::not_found("Recipe not found"));
        }
        steps.sort_by_key(|step| step.step_number);
        Ok(steps)
    }

    async fn find_by_name(&self, name: &str) -> Result<Recipe, Error> {
        self.recipes
            .find_by_name(name)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| Error::not_found("Recipe not found"))
    }
}

#[async_trait]
impl<R, S> RecipesCommand for RecipeService<R, S>
where
    R: RecipeRepository,
    S: StepRepository,
{
    async fn update_recipe(
        &self,
        id: RecipeId,
        update: RecipeUpdate,
    ) -> Result<Vec<Recipe>, Error> {
        self.recipes
            .update(id, &update)
            .await
            .map_err(map_recipe_error)
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<(), Error> {
        let deleted = self.recipes.delete(id).await.map_err(map_recipe_error)?;
        tracing::info!(recipe_id = %id, rows = deleted.len(), "recipe delete processed");
        Ok(())
    }
}
