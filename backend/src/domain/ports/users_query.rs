//! Driving port for user-facing queries.

use async_trait::async_trait;

use crate::domain::{Error, RecipeWithSteps, UserId, UserProfile};

/// Domain use-case port for listing users and their recipes.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user profile. An empty list is a valid answer.
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error>;

    /// Recipes owned by `user_id` with steps embedded.
    async fn list_user_recipes(&self, user_id: &UserId) -> Result<Vec<RecipeWithSteps>, Error>;
}
