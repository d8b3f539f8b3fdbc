//! Builders wiring the managed-backend adapters into HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use recipes_backend::domain::ports::TokenVerifier;
use recipes_backend::domain::{
    AccountService, RecipeCreationService, RecipeService, UserService,
};
use recipes_backend::inbound::http::state::{HttpState, HttpStatePorts};
use recipes_backend::outbound::jwt::JwtTokenVerifier;
use recipes_backend::outbound::supabase::{
    SupabaseClient, SupabaseIdentityProvider, SupabaseImageStorage, SupabaseRecipeRepository,
    SupabaseStepRepository, SupabaseUserRepository,
};

use super::ServerConfig;
use super::config::JwtSettings;

/// Pick local verification when a project secret is configured, otherwise
/// ask the identity provider about every token.
fn build_token_verifier(
    jwt: Option<&JwtSettings>,
    identity: Arc<SupabaseIdentityProvider>,
) -> Arc<dyn TokenVerifier> {
    match jwt {
        Some(settings) => {
            info!(audience = %settings.audience, "verifying access tokens locally");
            Arc::new(JwtTokenVerifier::new(
                settings.secret.as_bytes(),
                &settings.audience,
            ))
        }
        None => {
            info!("verifying access tokens with the identity provider");
            identity as Arc<dyn TokenVerifier>
        }
    }
}

/// Build the HTTP state over the managed backend.
///
/// # Errors
/// Returns [`std::io::Error`] when the shared HTTP client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let client = SupabaseClient::new(config.supabase.clone())
        .map_err(|err| std::io::Error::other(format!("managed backend client: {err}")))?;

    let recipes = Arc::new(SupabaseRecipeRepository::new(client.clone()));
    let steps = Arc::new(SupabaseStepRepository::new(client.clone()));
    let users = Arc::new(SupabaseUserRepository::new(client.clone()));
    let images = Arc::new(SupabaseImageStorage::new(client.clone()));
    let identity = Arc::new(SupabaseIdentityProvider::new(client));

    let recipe_service = Arc::new(RecipeService::new(recipes.clone(), steps.clone()));
    let user_service = Arc::new(UserService::new(
        users.clone(),
        recipes.clone(),
        identity.clone(),
    ));

    let ports = HttpStatePorts {
        recipe_creation: Arc::new(
            RecipeCreationService::new(users.clone(), images, recipes, steps)
                .with_bucket(config.image_bucket.clone()),
        ),
        recipes: recipe_service.clone(),
        recipes_command: recipe_service,
        users: user_service.clone(),
        users_command: user_service,
        accounts: Arc::new(AccountService::new(users, identity.clone())),
        token_verifier: build_token_verifier(config.jwt.as_ref(), identity),
    };
    Ok(web::Data::new(HttpState::new(ports)))
}
