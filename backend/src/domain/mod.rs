//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed recipe, step and user entities, the error
//! taxonomy shared by every adapter, and the services that orchestrate the
//! driven ports. Nothing in this module knows about HTTP or the managed
//! backend's wire formats.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Recipe, Step, UserProfile and their insert/patch companions.
//! - StepInstructions: parser for the `|`-delimited step field.
//! - RecipeCreationService: the multi-step publish workflow.
//! - RecipeService, UserService, AccountService: single-call use-cases.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod recipe;
pub mod recipe_creation_service;
pub mod recipe_image;
pub mod recipe_service;
pub mod step;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccessClaims, AuthSession, CredentialsValidationError, IdentityUser, LoginCredentials,
    Registration, RegistrationDraft, SignUpOutcome,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::recipe::{
    NewRecipe, Recipe, RecipeDraft, RecipeId, RecipeUpdate, RecipeValidationError,
    RecipeWithSteps,
};
pub use self::recipe_creation_service::RecipeCreationService;
pub use self::recipe_image::{
    IMAGE_CONTENT_TYPE, ImageValidationError, RECIPE_IMAGE_BUCKET, RecipeImage,
};
pub use self::recipe_service::RecipeService;
pub use self::step::{NewStep, NoStepsError, STEP_DELIMITER, Step, StepInstructions};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserProfile, UserProfileUpdate, UserValidationError, full_name};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use recipes_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Recipe not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
