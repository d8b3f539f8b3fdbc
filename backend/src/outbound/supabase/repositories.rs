//! Table-backed implementations of the recipe, step and user repositories.

use async_trait::async_trait;

use super::client::{SupabaseClient, SupabaseError};
use super::dto::{
    NewRecipeRow, NewStepRow, RECIPE_NAME_COLUMN, RECIPES_TABLE, RecipeRow, RecipeUpdateRow,
    RecipeWithStepsRow, STEPS_TABLE, StepRow, USERS_TABLE, UserEmailRow, UserRow, UserUpdateRow,
};
use super::rest::{RowQuery, TableClient};
use crate::domain::ports::{
    RecipeRepository, RecipeRepositoryError, StepRepository, StepRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    NewRecipe, NewStep, Recipe, RecipeId, RecipeUpdate, RecipeWithSteps, Step, UserId,
    UserProfile, UserProfileUpdate,
};

fn map_recipe_error(error: SupabaseError) -> RecipeRepositoryError {
    if error.is_connection() {
        RecipeRepositoryError::connection(error.to_string())
    } else {
        RecipeRepositoryError::query(error.to_string())
    }
}

fn map_step_error(error: SupabaseError) -> StepRepositoryError {
    if error.is_connection() {
        StepRepositoryError::connection(error.to_string())
    } else {
        StepRepositoryError::query(error.to_string())
    }
}

fn map_user_error(error: SupabaseError) -> UserRepositoryError {
    if error.is_connection() {
        UserRepositoryError::connection(error.to_string())
    } else {
        UserRepositoryError::query(error.to_string())
    }
}

fn recipes_from_rows(rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, RecipeRepositoryError> {
    rows.into_iter()
        .map(RecipeRow::into_domain)
        .collect::<Result<_, _>>()
        .map_err(RecipeRepositoryError::query)
}

fn users_from_rows(rows: Vec<UserRow>) -> Result<Vec<UserProfile>, UserRepositoryError> {
    rows.into_iter()
        .map(UserRow::into_domain)
        .collect::<Result<_, _>>()
        .map_err(UserRepositoryError::query)
}

/// Recipe repository over the `recipes` table.
#[derive(Clone)]
pub struct SupabaseRecipeRepository {
    table: TableClient,
}

impl SupabaseRecipeRepository {
    /// Create the repository.
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            table: TableClient::new(client, RECIPES_TABLE),
        }
    }
}

#[async_trait]
impl RecipeRepository for SupabaseRecipeRepository {
    async fn insert(&self, recipe: &NewRecipe) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let rows: Vec<RecipeRow> = self
            .table
            .insert(&NewRecipeRow::from(recipe))
            .await
            .map_err(map_recipe_error)?;
        Ok(recipes_from_rows(rows)?.into_iter().next())
    }

    async fn delete(&self, id: RecipeId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let rows: Vec<RecipeRow> = self
            .table
            .delete(&RowQuery::new().eq("id", id))
            .await
            .map_err(map_recipe_error)?;
        recipes_from_rows(rows)
    }

    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let rows: Vec<RecipeRow> = self
            .table
            .select(&RowQuery::new().select("*"))
            .await
            .map_err(map_recipe_error)?;
        recipes_from_rows(rows)
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let rows: Vec<RecipeRow> = self
            .table
            .select(&RowQuery::new().select("*").eq("id", id))
            .await
            .map_err(map_recipe_error)?;
        Ok(recipes_from_rows(rows)?.into_iter().next())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let query = RowQuery::new()
            .select("*")
            .eq(RECIPE_NAME_COLUMN, name)
            .order_asc("id")
            .limit(1);
        let rows: Vec<RecipeRow> = self.table.select(&query).await.map_err(map_recipe_error)?;
        Ok(recipes_from_rows(rows)?.into_iter().next())
    }

    async fn update(
        &self,
        id: RecipeId,
        update: &RecipeUpdate,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let rows: Vec<RecipeRow> = self
            .table
            .update(&RecipeUpdateRow::from(update), &RowQuery::new().eq("id", id))
            .await
            .map_err(map_recipe_error)?;
        recipes_from_rows(rows)
    }

    async fn list_with_steps_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RecipeWithSteps>, RecipeRepositoryError> {
        let query = RowQuery::new()
            .select("*,steps(*)")
            .eq("user_id", user_id)
            .order_embedded_asc(STEPS_TABLE, "step_number");
        let rows: Vec<RecipeWithStepsRow> =
            self.table.select(&query).await.map_err(map_recipe_error)?;
        rows.into_iter()
            .map(RecipeWithStepsRow::into_domain)
            .collect::<Result<_, _>>()
            .map_err(RecipeRepositoryError::query)
    }
}

/// Step repository over the `steps` table.
#[derive(Clone)]
pub struct SupabaseStepRepository {
    table: TableClient,
}

impl SupabaseStepRepository {
    /// Create the repository.
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            table: TableClient::new(client, STEPS_TABLE),
        }
    }
}

#[async_trait]
impl StepRepository for SupabaseStepRepository {
    async fn insert_batch(&self, steps: &[NewStep]) -> Result<Vec<Step>, StepRepositoryError> {
        let batch: Vec<NewStepRow<'_>> = steps.iter().map(NewStepRow::from).collect();
        let rows: Vec<StepRow> = self
            .table
            .insert(batch.as_slice())
            .await
            .map_err(map_step_error)?;
        rows.into_iter()
            .map(StepRow::into_domain)
            .collect::<Result<_, _>>()
            .map_err(StepRepositoryError::query)
    }

    async fn list_for_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Step>, StepRepositoryError> {
        let query = RowQuery::new()
            .select("*")
            .eq("recipe_id", recipe_id)
            .order_asc("step_number");
        let rows: Vec<StepRow> = self.table.select(&query).await.map_err(map_step_error)?;
        rows.into_iter()
            .map(StepRow::into_domain)
            .collect::<Result<_, _>>()
            .map_err(StepRepositoryError::query)
    }
}

/// User repository over the `users` table.
#[derive(Clone)]
pub struct SupabaseUserRepository {
    table: TableClient,
}

impl SupabaseUserRepository {
    /// Create the repository.
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            table: TableClient::new(client, USERS_TABLE),
        }
    }
}

#[async_trait]
impl UserRepository for SupabaseUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserRepositoryError> {
        let rows: Vec<UserRow> = self
            .table
            .select(&RowQuery::new().select("*").eq("id", id))
            .await
            .map_err(map_user_error)?;
        Ok(users_from_rows(rows)?.into_iter().next())
    }

    async fn find_email_by_username(
        &self,
        username: &str,
    ) -> Result<Option<String>, UserRepositoryError> {
        let query = RowQuery::new()
            .select("email")
            .eq("username", username)
            .limit(1);
        let rows: Vec<UserEmailRow> = self.table.select(&query).await.map_err(map_user_error)?;
        Ok(rows.into_iter().next().and_then(|row| row.email))
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>, UserRepositoryError> {
        let rows: Vec<UserRow> = self
            .table
            .select(&RowQuery::new().select("*"))
            .await
            .map_err(map_user_error)?;
        users_from_rows(rows)
    }

    async fn update(
        &self,
        id: &UserId,
        update: &UserProfileUpdate,
    ) -> Result<Vec<UserProfile>, UserRepositoryError> {
        let rows: Vec<UserRow> = self
            .table
            .update(&UserUpdateRow::from(update), &RowQuery::new().eq("id", id))
            .await
            .map_err(map_user_error)?;
        users_from_rows(rows)
    }

    async fn delete(&self, id: &UserId) -> Result<Vec<UserProfile>, UserRepositoryError> {
        let rows: Vec<UserRow> = self
            .table
            .delete(&RowQuery::new().eq("id", id))
            .await
            .map_err(map_user_error)?;
        users_from_rows(rows)
    }
}
