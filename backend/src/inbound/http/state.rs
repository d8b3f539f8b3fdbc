//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, RecipeCreation, RecipesCommand, RecipesQuery, TokenVerifier, UsersCommand,
    UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub recipe_creation: Arc<dyn RecipeCreation>,
    pub recipes: Arc<dyn RecipesQuery>,
    pub recipes_command: Arc<dyn RecipesCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub accounts: Arc<dyn AccountCommand>,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub recipe_creation: Arc<dyn RecipeCreation>,
    pub recipes: Arc<dyn RecipesQuery>,
    pub recipes_command: Arc<dyn RecipesCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub accounts: Arc<dyn AccountCommand>,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use recipes_backend::inbound::http::state::HttpState;
    /// use recipes_backend::test_support::InMemoryBackend;
    ///
    /// let backend = InMemoryBackend::default();
    /// let state = HttpState::new(backend.http_ports());
    /// let _recipes = state.recipes.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            recipe_creation,
            recipes,
            recipes_command,
            users,
            users_command,
            accounts,
            token_verifier,
        } = ports;
        Self {
            recipe_creation,
            recipes,
            recipes_command,
            users,
            users_command,
            accounts,
            token_verifier,
        }
    }
}
