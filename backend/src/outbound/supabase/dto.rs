//! Row DTOs for the recipes, steps and users tables.
//!
//! Column names are fixed by the hosted schema; the recipe name column is
//! literally `recipe-name`. Rows decode into these DTOs first and are then
//! mapped into domain records in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::{
    NewRecipe, NewStep, Recipe, RecipeId, RecipeUpdate, RecipeWithSteps, Step, UserId,
    UserProfile, UserProfileUpdate,
};

pub(super) const RECIPES_TABLE: &str = "recipes";
pub(super) const STEPS_TABLE: &str = "steps";
pub(super) const USERS_TABLE: &str = "users";

pub(super) const RECIPE_NAME_COLUMN: &str = "recipe-name";

#[derive(Debug, Deserialize)]
pub(super) struct RecipeRow {
    id: i64,
    #[serde(rename = "recipe-name", default)]
    name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    image_tags: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
    user_id: String,
}

impl RecipeRow {
    pub(super) fn into_domain(self) -> Result<Recipe, String> {
        let user_id = UserId::new(&self.user_id)
            .map_err(|err| format!("recipe {} has invalid user_id: {err}", self.id))?;
        Ok(Recipe {
            id: RecipeId::new(self.id),
            name: self.name.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
            tags: self.image_tags.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            user_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RecipeWithStepsRow {
    #[serde(flatten)]
    recipe: RecipeRow,
    #[serde(default)]
    steps: Vec<StepRow>,
}

impl RecipeWithStepsRow {
    pub(super) fn into_domain(self) -> Result<RecipeWithSteps, String> {
        let recipe = self.recipe.into_domain()?;
        let mut steps = self
            .steps
            .into_iter()
            .map(StepRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        steps.sort_by_key(|step| step.step_number);
        Ok(RecipeWithSteps { recipe, steps })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewRecipeRow<'a> {
    #[serde(rename = "recipe-name")]
    name: &'a str,
    image_url: &'a str,
    image_tags: &'a [String],
    description: &'a str,
    user_id: String,
}

impl<'a> From<&'a NewRecipe> for NewRecipeRow<'a> {
    fn from(value: &'a NewRecipe) -> Self {
        Self {
            name: &value.name,
            image_url: &value.image_url,
            image_tags: &value.tags,
            description: &value.description,
            user_id: value.user_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RecipeUpdateRow<'a> {
    #[serde(rename = "recipe-name")]
    name: &'a str,
    image_url: &'a str,
    image_tags: &'a [String],
    description: &'a str,
}

impl<'a> From<&'a RecipeUpdate> for RecipeUpdateRow<'a> {
    fn from(value: &'a RecipeUpdate) -> Self {
        Self {
            name: &value.name,
            image_url: &value.image_url,
            image_tags: &value.tags,
            description: &value.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StepRow {
    id: i64,
    recipe_id: i64,
    step_number: i64,
    #[serde(default)]
    instruction: Option<String>,
}

impl StepRow {
    pub(super) fn into_domain(self) -> Result<Step, String> {
        let step_number = u32::try_from(self.step_number)
            .ok()
            .filter(|number| *number > 0)
            .ok_or_else(|| {
                format!(
                    "step {} has invalid step_number {}",
                    self.id, self.step_number
                )
            })?;
        Ok(Step {
            id: self.id,
            recipe_id: RecipeId::new(self.recipe_id),
            step_number,
            instruction: self.instruction.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewStepRow<'a> {
    recipe_id: i64,
    step_number: u32,
    instruction: &'a str,
}

impl<'a> From<&'a NewStep> for NewStepRow<'a> {
    fn from(value: &'a NewStep) -> Self {
        Self {
            recipe_id: value.recipe_id.get(),
            step_number: value.step_number,
            instruction: &value.instruction,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserRow {
    id: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    user_type: Option<String>,
}

impl UserRow {
    pub(super) fn into_domain(self) -> Result<UserProfile, String> {
        let id = UserId::new(&self.id).map_err(|err| format!("user row has invalid id: {err}"))?;
        Ok(UserProfile {
            id,
            full_name: self.full_name,
            email: self.email,
            username: self.username,
            user_type: self.user_type,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserEmailRow {
    #[serde(default)]
    pub(super) email: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct UserUpdateRow<'a> {
    full_name: &'a str,
    username: &'a str,
    email: &'a str,
    user_type: &'a str,
}

impl<'a> From<&'a UserProfileUpdate> for UserUpdateRow<'a> {
    fn from(value: &'a UserProfileUpdate) -> Self {
        Self {
            full_name: &value.full_name,
            username: &value.username,
            email: &value.email,
            user_type: &value.user_type,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row decoding and encoding.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const OWNER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    fn recipe_rows_use_the_hyphenated_name_column() {
        let row: RecipeRow = serde_json::from_value(json!({
            "id": 3,
            "recipe-name": "Pasta",
            "image_url": "https://cdn.test/p.jpg",
            "image_tags": ["vegan", "quick"],
            "description": null,
            "user_id": OWNER,
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .expect("row decodes");
        let recipe = row.into_domain().expect("row maps");
        assert_eq!(recipe.name, "Pasta");
        assert_eq!(recipe.tags, vec!["vegan", "quick"]);
        assert_eq!(recipe.description, "");
    }

    #[rstest]
    fn new_recipe_rows_serialise_store_columns() {
        let new = NewRecipe {
            name: "Pasta".into(),
            image_url: "https://cdn.test/p.jpg".into(),
            tags: vec!["vegan".into()],
            description: "Quick".into(),
            user_id: UserId::new(OWNER).expect("uuid"),
        };
        let value = serde_json::to_value(NewRecipeRow::from(&new)).expect("serialise");
        assert_eq!(
            value,
            json!({
                "recipe-name": "Pasta",
                "image_url": "https://cdn.test/p.jpg",
                "image_tags": ["vegan"],
                "description": "Quick",
                "user_id": OWNER
            })
        );
    }

    #[rstest]
    fn embedded_steps_are_sorted() {
        let row: RecipeWithStepsRow = serde_json::from_value(json!({
            "id": 1,
            "recipe-name": "Toast",
            "image_url": "u",
            "image_tags": [],
            "description": "",
            "user_id": OWNER,
            "steps": [
                { "id": 11, "recipe_id": 1, "step_number": 2, "instruction": "Butter" },
                { "id": 10, "recipe_id": 1, "step_number": 1, "instruction": "Toast" }
            ]
        }))
        .expect("row decodes");
        let mapped = row.into_domain().expect("row maps");
        let instructions: Vec<&str> = mapped
            .steps
            .iter()
            .map(|s| s.instruction.as_str())
            .collect();
        assert_eq!(instructions, vec!["Toast", "Butter"]);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn invalid_step_numbers_are_rejected(#[case] number: i64) {
        let row: StepRow = serde_json::from_value(json!({
            "id": 1, "recipe_id": 1, "step_number": number, "instruction": "x"
        }))
        .expect("row decodes");
        assert!(row.into_domain().is_err());
    }

    #[rstest]
    fn user_rows_with_bad_ids_are_rejected() {
        let row: UserRow = serde_json::from_value(json!({ "id": "bob" })).expect("row decodes");
        assert!(row.into_domain().is_err());
    }
}
