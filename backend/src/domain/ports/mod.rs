//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`RecipeCreation`, `RecipesQuery`, `RecipesCommand`,
//! `UsersQuery`, `UsersCommand`, `AccountCommand`) are called by inbound
//! adapters. Driven ports (repositories, storage, identity, token
//! verification) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod identity_provider;
mod image_storage;
mod recipe_creation;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod step_repository;
mod token_verifier;
mod user_repository;
mod users_command;
mod users_query;

pub use account_command::AccountCommand;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use image_storage::MockImageStorage;
pub use image_storage::{ImageStorage, ImageStorageError};
pub use recipe_creation::{CreateRecipeRequest, RecipeCreation};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
pub use recipes_command::RecipesCommand;
pub use recipes_query::RecipesQuery;
#[cfg(test)]
pub use step_repository::MockStepRepository;
pub use step_repository::{StepRepository, StepRepositoryError};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{TokenVerificationError, TokenVerifier};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
