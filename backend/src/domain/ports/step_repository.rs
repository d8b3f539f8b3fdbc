//! Port for the steps table.

use async_trait::async_trait;

use crate::domain::{NewStep, RecipeId, Step};

use super::define_port_error;

define_port_error! {
    /// Errors raised by step repository adapters.
    pub enum StepRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "step repository connection failed: {message}",
        /// The store rejected the request or returned an unreadable body.
        Query { message: String } => "step repository query failed: {message}",
    }
}

/// Port for reading and writing step rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StepRepository: Send + Sync {
    /// Insert every step in a single call and return the stored rows.
    async fn insert_batch(&self, steps: &[NewStep]) -> Result<Vec<Step>, StepRepositoryError>;

    /// Steps of `recipe_id` ordered by ascending step number.
    async fn list_for_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Step>, StepRepositoryError>;
}
