//! Recipe entities and the validated inputs used to create or patch them.

use std::fmt;

use crate::domain::UserId;

/// Store-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(i64);

impl RecipeId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecipeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Validation errors raised while building recipe inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// Title was blank once trimmed.
    EmptyTitle,
    /// No tags were supplied.
    NoTags,
    /// A tag was blank once trimmed.
    EmptyTag,
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::NoTags => write!(f, "at least one recipe tag is required"),
            Self::EmptyTag => write!(f, "recipe tags must not be blank"),
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// A published recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Store-assigned identifier.
    pub id: RecipeId,
    /// Display name.
    pub name: String,
    /// Public URL of the uploaded image.
    pub image_url: String,
    /// Tags in submission order.
    pub tags: Vec<String>,
    /// Free-text description.
    pub description: String,
    /// Owner of the recipe.
    pub user_id: UserId,
}

/// Title and tags of a recipe awaiting creation.
///
/// ## Invariants
/// - `title` is trimmed and non-empty.
/// - `tags` is non-empty and keeps submission order; each tag is trimmed.
///
/// # Examples
/// ```
/// use recipes_backend::domain::RecipeDraft;
///
/// let draft = RecipeDraft::try_new(" Pasta ", "Quick dinner", vec!["vegan".into()]).unwrap();
/// assert_eq!(draft.title(), "Pasta");
/// assert!(RecipeDraft::try_new("Pasta", "", Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    title: String,
    description: String,
    tags: Vec<String>,
}

impl RecipeDraft {
    /// Validate the textual parts of a creation request.
    pub fn try_new(
        title: &str,
        description: &str,
        tags: Vec<String>,
    ) -> Result<Self, RecipeValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if tags.is_empty() {
            return Err(RecipeValidationError::NoTags);
        }
        let tags = tags
            .into_iter()
            .map(|tag| {
                let trimmed = tag.trim();
                if trimmed.is_empty() {
                    Err(RecipeValidationError::EmptyTag)
                } else {
                    Ok(trimmed.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            title: title.to_owned(),
            description: description.trim().to_owned(),
            tags,
        })
    }

    /// Recipe name.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tags in submission order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Combine with the resolved image URL into an insertable row.
    pub fn into_new_recipe(self, user_id: UserId, image_url: String) -> NewRecipe {
        NewRecipe {
            name: self.title,
            image_url,
            tags: self.tags,
            description: self.description,
            user_id,
        }
    }
}

/// Row inserted into the recipes table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    /// Display name.
    pub name: String,
    /// Public image URL.
    pub image_url: String,
    /// Tags in submission order.
    pub tags: Vec<String>,
    /// Free-text description.
    pub description: String,
    /// Owner.
    pub user_id: UserId,
}

/// Patch written by `PUT /update_recipe/{id}`.
///
/// The owner is never rewritten through an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeUpdate {
    /// New display name.
    pub name: String,
    /// New image URL.
    pub image_url: String,
    /// Replacement tag list.
    pub tags: Vec<String>,
    /// New description.
    pub description: String,
}

/// A recipe together with its ordered steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeWithSteps {
    /// The recipe row.
    pub recipe: Recipe,
    /// Steps ordered by ascending step number.
    pub steps: Vec<crate::domain::Step>,
}
