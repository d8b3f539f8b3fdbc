//! User profile services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, RecipeRepository, RecipeRepositoryError,
    UserRepository, UserRepositoryError, UsersCommand, UsersQuery,
};
use crate::domain::{Error, RecipeWithSteps, UserId, UserProfile, UserProfileUpdate};

fn map_user_error(error: UserRepositoryError) -> Error {
    Error::upstream(error.to_string())
}

fn map_recipe_error(error: RecipeRepositoryError) -> Error {
    Error::upstream(error.to_string())
}

fn map_identity_error(error: IdentityProviderError) -> Error {
    Error::upstream(error.to_string())
}

/// Service implementing the user query and command driving ports.
#[derive(Clone)]
pub struct UserService<U, R, I> {
    users: Arc<U>,
    recipes: Arc<R>,
    identity: Arc<I>,
}

impl<U, R, I> UserService<U, R, I> {
    /// Create the service.
    pub fn new(users: Arc<U>, recipes: Arc<R>, identity: Arc<I>) -> Self {
        Self {
            users,
            recipes,
            identity,
        }
    }
}

#[async_trait]
impl<U, R, I> UsersQuery for UserService<U, R, I>
where
    U: UserRepository,
    R: RecipeRepository,
    I: IdentityProvider,
{
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error> {
        self.users.list_all().await.map_err(map_user_error)
    }

    async fn list_user_recipes(&self, user_id: &UserId) -> Result<Vec<RecipeWithSteps>, Error> {
        let mut recipes = self
            .recipes
            .list_with_steps_for_user(user_id)
            .await
            .map_err(map_recipe_error)?;
        for entry in &mut recipes {
            entry.steps.sort_by_key(|step| step.step_number);
        }
        Ok(recipes)
    }
}

#[async_trait]
impl<U, R, I> UsersCommand for UserService<U, R, I>
where
    U: UserRepository,
    R: RecipeRepository,
    I: IdentityProvider,
{
    async fn update_user(
        &self,
        id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<Vec<UserProfile>, Error> {
        self.users
            .update(id, &update)
            .await
            .map_err(map_user_error)
    }

    async fn delete_user(&self, id: &UserId) -> Result<Vec<UserProfile>, Error> {
        let deleted = self.users.delete(id).await.map_err(map_user_error)?;
        self.identity
            .admin_delete_user(id)
            .await
            .map_err(map_identity_error)?;
        info!(user_id = %id, rows = deleted.len(), "user deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockIdentityProvider, MockRecipeRepository, MockUserRepository};
    use crate::domain::{Recipe, RecipeId, Step};
    use mockall::Sequence;
    use rstest::rstest;

    type Service = UserService<MockUserRepository, MockRecipeRepository, MockIdentityProvider>;

    fn profile(id: UserId) -> UserProfile {
        UserProfile {
            id,
            full_name: Some("Grace Hopper".into()),
            email: Some("grace@example.com".into()),
            username: Some("grace".into()),
            user_type: Some("chef".into()),
        }
    }

    fn service(
        users: MockUserRepository,
        recipes: MockRecipeRepository,
        identity: MockIdentityProvider,
    ) -> Service {
        UserService::new(Arc::new(users), Arc::new(recipes), Arc::new(identity))
    }

    #[rstest]
    #[tokio::test]
    async fn empty_user_list_is_allowed() {
        let mut users = MockUserRepository::new();
        users.expect_list_all().returning(|| Ok(Vec::new()));

        let listed = service(users, MockRecipeRepository::new(), MockIdentityProvider::new())
            .list_users()
            .await
            .expect("list users");

        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn user_recipes_embed_ordered_steps() {
        let owner = UserId::random();
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_list_with_steps_for_user()
            .withf(move |id| *id == owner)
            .returning(move |_| {
                let steps = [2_u32, 1]
                    .into_iter()
                    .map(|n| Step {
                        id: i64::from(n),
                        recipe_id: RecipeId::new(1),
                        step_number: n,
                        instruction: format!("step {n}"),
                    })
                    .collect();
                Ok(vec![RecipeWithSteps {
                    recipe: Recipe {
                        id: RecipeId::new(1),
                        name: "Toast".into(),
                        image_url: "https://cdn.test/toast.jpg".into(),
                        tags: vec!["breakfast".into()],
                        description: String::new(),
                        user_id: owner,
                    },
                    steps,
                }])
            });

        let listed = service(MockUserRepository::new(), recipes, MockIdentityProvider::new())
            .list_user_recipes(&owner)
            .await
            .expect("user recipes");

        let numbers: Vec<u32> = listed[0].steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_row_then_identity() {
        let id = UserId::random();
        let mut seq = Sequence::new();
        let mut users = MockUserRepository::new();
        users
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| Ok(vec![profile(*id)]));
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_admin_delete_user()
            .withf(move |target| *target == id)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let deleted = service(users, MockRecipeRepository::new(), identity)
            .delete_user(&id)
            .await
            .expect("user deleted");

        assert_eq!(deleted, vec![profile(id)]);
    }

    #[rstest]
    #[tokio::test]
    async fn identity_failure_is_upstream() {
        let mut users = MockUserRepository::new();
        users.expect_delete().returning(|_| Ok(Vec::new()));
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_admin_delete_user()
            .returning(|_| Err(IdentityProviderError::rejected("User not found")));

        let err = service(users, MockRecipeRepository::new(), identity)
            .delete_user(&UserId::random())
            .await
            .expect_err("identity failure");

        assert_eq!(err.code(), ErrorCode::UpstreamFailed);
        assert!(err.message().contains("User not found"));
    }
}
