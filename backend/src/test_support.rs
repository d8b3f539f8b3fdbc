//! In-memory test doubles for the driven ports.
//!
//! [`InMemoryBackend`] stands in for the managed store, object storage and
//! identity provider at once, so HTTP handlers and integration tests can run
//! the real domain services without network access. Behaviour mirrors the
//! hosted backend closely enough for the workflows under test: sign-up also
//! writes the users row, ids are assigned sequentially, and embedded steps
//! come back ordered.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, ImageStorage, ImageStorageError, RecipeRepository,
    RecipeRepositoryError, StepRepository, StepRepositoryError, TokenVerificationError,
    TokenVerifier, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AccessClaims, AccountService, AuthSession, IdentityUser, NewRecipe, NewStep, Recipe,
    RecipeCreationService, RecipeId, RecipeService, RecipeUpdate, RecipeWithSteps, Registration,
    SignUpOutcome, Step, UserId, UserProfile, UserProfileUpdate, UserService,
};
use crate::inbound::http::state::HttpStatePorts;

/// Base URL used for public image links.
pub const PUBLIC_BASE_URL: &str = "https://storage.test";

/// Object written through [`ImageStorage::upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone)]
struct Identity {
    id: UserId,
    email: String,
    password: String,
    metadata: Value,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<UserProfile>,
    recipes: Vec<Recipe>,
    steps: Vec<Step>,
    objects: HashMap<String, StoredObject>,
    identities: Vec<Identity>,
    sessions: HashMap<String, UserId>,
    next_recipe_id: i64,
    next_step_id: i64,
    fail_step_inserts: bool,
    fail_uploads: bool,
}

/// Shared in-memory backend implementing every driven port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<State>>,
}

impl InMemoryBackend {
    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("in-memory backend mutex poisoned"),
        }
    }

    /// Insert a users row directly.
    pub fn add_user(&self, profile: UserProfile) {
        self.lock().users.push(profile);
    }

    /// Insert a users row with the given id and username.
    pub fn add_user_named(&self, id: UserId, username: &str) -> UserProfile {
        let profile = UserProfile {
            id,
            full_name: Some(format!("{username} Tester")),
            email: Some(format!("{username}@example.com")),
            username: Some(username.to_owned()),
            user_type: Some("chef".to_owned()),
        };
        self.add_user(profile.clone());
        profile
    }

    /// Issue an access token for `id` without going through sign-in.
    pub fn issue_token(&self, id: UserId) -> String {
        let token = format!("token-{}", uuid::Uuid::new_v4());
        self.lock().sessions.insert(token.clone(), id);
        token
    }

    /// Make every subsequent step batch insert fail.
    pub fn fail_step_inserts(&self) {
        self.lock().fail_step_inserts = true;
    }

    /// Make every subsequent upload fail.
    pub fn fail_uploads(&self) {
        self.lock().fail_uploads = true;
    }

    /// Snapshot of the recipes table.
    pub fn recipes(&self) -> Vec<Recipe> {
        self.lock().recipes.clone()
    }

    /// Snapshot of the steps table.
    pub fn steps(&self) -> Vec<Step> {
        self.lock().steps.clone()
    }

    /// Snapshot of the users table.
    pub fn users(&self) -> Vec<UserProfile> {
        self.lock().users.clone()
    }

    /// Object stored at `bucket/path`, if any.
    pub fn object(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.lock().objects.get(&object_key(bucket, path)).cloned()
    }

    /// Whether the identity provider still knows `id`.
    pub fn has_identity(&self, id: &UserId) -> bool {
        self.lock().identities.iter().any(|identity| identity.id == *id)
    }

    /// Wire the domain services over this backend into HTTP state ports.
    pub fn http_ports(&self) -> HttpStatePorts {
        let backend = Arc::new(self.clone());
        HttpStatePorts {
            recipe_creation: Arc::new(RecipeCreationService::new(
                backend.clone(),
                backend.clone(),
                backend.clone(),
                backend.clone(),
            )),
            recipes: Arc::new(RecipeService::new(backend.clone(), backend.clone())),
            recipes_command: Arc::new(RecipeService::new(backend.clone(), backend.clone())),
            users: Arc::new(UserService::new(
                backend.clone(),
                backend.clone(),
                backend.clone(),
            )),
            users_command: Arc::new(UserService::new(
                backend.clone(),
                backend.clone(),
                backend.clone(),
            )),
            accounts: Arc::new(AccountService::new(backend.clone(), backend.clone())),
            token_verifier: backend,
        }
    }
}

fn object_key(bucket: &str, path: &str) -> String {
    format!("{bucket}/{path}")
}

fn identity_user(identity: &Identity) -> IdentityUser {
    IdentityUser {
        id: identity.id,
        email: Some(identity.email.clone()),
        user_metadata: identity.metadata.clone(),
    }
}

fn session_for(state: &mut State, identity: &Identity) -> AuthSession {
    let token = format!("token-{}", uuid::Uuid::new_v4());
    state.sessions.insert(token.clone(), identity.id);
    AuthSession {
        access_token: token,
        token_type: "bearer".to_owned(),
        expires_in: Some(3600),
        refresh_token: Some(format!("refresh-{}", uuid::Uuid::new_v4())),
        user: identity_user(identity),
    }
}

fn apply_recipe_update(recipe: &mut Recipe, update: &RecipeUpdate) {
    recipe.name = update.name.clone();
    recipe.image_url = update.image_url.clone();
    recipe.tags = update.tags.clone();
    recipe.description = update.description.clone();
}

fn apply_user_update(user: &mut UserProfile, update: &UserProfileUpdate) {
    user.full_name = Some(update.full_name.clone());
    user.username = Some(update.username.clone());
    user.email = Some(update.email.clone());
    user.user_type = Some(update.user_type.clone());
}

#[async_trait]
impl RecipeRepository for InMemoryBackend {
    async fn insert(&self, recipe: &NewRecipe) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut state = self.lock();
        state.next_recipe_id += 1;
        let row = Recipe {
            id: RecipeId::new(state.next_recipe_id),
            name: recipe.name.clone(),
            image_url: recipe.image_url.clone(),
            tags: recipe.tags.clone(),
            description: recipe.description.clone(),
            user_id: recipe.user_id,
        };
        state.recipes.push(row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, id: RecipeId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut state = self.lock();
        let (deleted, kept): (Vec<Recipe>, Vec<Recipe>) = std::mem::take(&mut state.recipes)
            .into_iter()
            .partition(|recipe| recipe.id == id);
        state.recipes = kept;
        state.steps.retain(|step| step.recipe_id != id);
        Ok(deleted)
    }

    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        Ok(self.lock().recipes.clone())
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(self.lock().recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(self.lock().recipes.iter().find(|r| r.name == name).cloned())
    }

    async fn update(
        &self,
        id: RecipeId,
        update: &RecipeUpdate,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut state = self.lock();
        let mut updated = Vec::new();
        for recipe in state.recipes.iter_mut().filter(|r| r.id == id) {
            apply_recipe_update(recipe, update);
            updated.push(recipe.clone());
        }
        Ok(updated)
    }

    async fn list_with_steps_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RecipeWithSteps>, RecipeRepositoryError> {
        let state = self.lock();
        Ok(state
            .recipes
            .iter()
            .filter(|recipe| recipe.user_id == *user_id)
            .map(|recipe| {
                let mut steps: Vec<Step> = state
                    .steps
                    .iter()
                    .filter(|step| step.recipe_id == recipe.id)
                    .cloned()
                    .collect();
                steps.sort_by_key(|step| step.step_number);
                RecipeWithSteps {
                    recipe: recipe.clone(),
                    steps,
                }
            })
            .collect())
    }
}

#[async_trait]
impl StepRepository for InMemoryBackend {
    async fn insert_batch(&self, steps: &[NewStep]) -> Result<Vec<Step>, StepRepositoryError> {
        let mut state = self.lock();
        if state.fail_step_inserts {
            return Err(StepRepositoryError::query("steps insert rejected"));
        }
        let mut created = Vec::with_capacity(steps.len());
        for step in steps {
            state.next_step_id += 1;
            created.push(Step {
                id: state.next_step_id,
                recipe_id: step.recipe_id,
                step_number: step.step_number,
                instruction: step.instruction.clone(),
            });
        }
        state.steps.extend(created.iter().cloned());
        Ok(created)
    }

    async fn list_for_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Step>, StepRepositoryError> {
        let mut steps: Vec<Step> = self
            .lock()
            .steps
            .iter()
            .filter(|step| step.recipe_id == recipe_id)
            .cloned()
            .collect();
        steps.sort_by_key(|step| step.step_number);
        Ok(steps)
    }
}

#[async_trait]
impl UserRepository for InMemoryBackend {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserRepositoryError> {
        Ok(self.lock().users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_email_by_username(
        &self,
        username: &str,
    ) -> Result<Option<String>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .and_then(|u| u.email.clone()))
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>, UserRepositoryError> {
        Ok(self.lock().users.clone())
    }

    async fn update(
        &self,
        id: &UserId,
        update: &UserProfileUpdate,
    ) -> Result<Vec<UserProfile>, UserRepositoryError> {
        let mut state = self.lock();
        let mut updated = Vec::new();
        for user in state.users.iter_mut().filter(|u| u.id == *id) {
            apply_user_update(user, update);
            updated.push(user.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, id: &UserId) -> Result<Vec<UserProfile>, UserRepositoryError> {
        let mut state = self.lock();
        let (deleted, kept): (Vec<UserProfile>, Vec<UserProfile>) = std::mem::take(&mut state.users)
            .into_iter()
            .partition(|user| user.id == *id);
        state.users = kept;
        Ok(deleted)
    }
}

#[async_trait]
impl ImageStorage for InMemoryBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), ImageStorageError> {
        let mut state = self.lock();
        if state.fail_uploads {
            return Err(ImageStorageError::rejected("bucket unavailable"));
        }
        let key = object_key(bucket, path);
        if state.objects.contains_key(&key) {
            return Err(ImageStorageError::rejected("The resource already exists"));
        }
        state.objects.insert(
            key,
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_owned(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{PUBLIC_BASE_URL}/storage/v1/object/public/{bucket}/{path}")
    }
}

#[async_trait]
impl IdentityProvider for InMemoryBackend {
    async fn sign_up(
        &self,
        registration: &Registration,
    ) -> Result<SignUpOutcome, IdentityProviderError> {
        let mut state = self.lock();
        if state
            .identities
            .iter()
            .any(|identity| identity.email == registration.email())
        {
            return Err(IdentityProviderError::rejected("User already registered"));
        }
        let identity = Identity {
            id: UserId::random(),
            email: registration.email().to_owned(),
            password: registration.password().to_owned(),
            metadata: json!({
                "full_name": registration.full_name(),
                "username": registration.username(),
                "userType": registration.user_type(),
            }),
        };
        state.users.push(UserProfile {
            id: identity.id,
            full_name: Some(registration.full_name().to_owned()),
            email: Some(identity.email.clone()),
            username: Some(registration.username().to_owned()),
            user_type: Some(registration.user_type().to_owned()),
        });
        state.identities.push(identity.clone());
        let session = session_for(&mut state, &identity);
        Ok(SignUpOutcome {
            user: identity_user(&identity),
            session: Some(session),
        })
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, IdentityProviderError> {
        let mut state = self.lock();
        let identity = state
            .identities
            .iter()
            .find(|identity| identity.email == email && identity.password == password)
            .cloned()
            .ok_or(IdentityProviderError::InvalidCredentials)?;
        Ok(session_for(&mut state, &identity))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityProviderError> {
        self.lock()
            .sessions
            .remove(access_token)
            .map(|_| ())
            .ok_or_else(|| IdentityProviderError::invalid_token("session not found"))
    }

    async fn fetch_user(&self, access_token: &str) -> Result<IdentityUser, IdentityProviderError> {
        let state = self.lock();
        let id = state
            .sessions
            .get(access_token)
            .ok_or_else(|| IdentityProviderError::invalid_token("session not found"))?;
        state
            .identities
            .iter()
            .find(|identity| identity.id == *id)
            .map(identity_user)
            .ok_or_else(|| IdentityProviderError::invalid_token("user not found"))
    }

    async fn admin_delete_user(&self, id: &UserId) -> Result<(), IdentityProviderError> {
        let mut state = self.lock();
        state.identities.retain(|identity| identity.id != *id);
        state.sessions.retain(|_, owner| *owner != *id);
        Ok(())
    }
}

#[async_trait]
impl TokenVerifier for InMemoryBackend {
    async fn verify(&self, token: &str) -> Result<AccessClaims, TokenVerificationError> {
        let id = self
            .lock()
            .sessions
            .get(token)
            .copied()
            .ok_or_else(|| TokenVerificationError::invalid("unknown token"))?;
        Ok(AccessClaims {
            sub: id.to_string(),
            exp: None,
            email: None,
            role: Some("authenticated".to_owned()),
            extra: Map::new(),
        })
    }
}
