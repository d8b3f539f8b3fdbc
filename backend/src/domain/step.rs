//! Recipe steps and the parser for the `|`-delimited instruction string.
//!
//! The creation form carries every instruction in a single text field:
//!
//! - `|` separates instructions;
//! - `\|` is a literal `|` and `\\` is a literal `\`;
//! - any other backslash is kept as written;
//! - entries are trimmed and blank entries are dropped before numbering.

use std::fmt;

use crate::domain::RecipeId;

/// Separator between instructions in the submitted step string.
pub const STEP_DELIMITER: char = '|';

const ESCAPE: char = '\\';

/// A persisted recipe step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Store-assigned identifier.
    pub id: i64,
    /// Recipe this step belongs to.
    pub recipe_id: RecipeId,
    /// 1-based position within the recipe.
    pub step_number: u32,
    /// Instruction text.
    pub instruction: String,
}

/// Step row awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStep {
    /// Recipe this step belongs to.
    pub recipe_id: RecipeId,
    /// 1-based position within the recipe.
    pub step_number: u32,
    /// Instruction text.
    pub instruction: String,
}

/// Raised when a step string yields no instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoStepsError;

impl fmt::Display for NoStepsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at least one step is required")
    }
}

impl std::error::Error for NoStepsError {}

/// Ordered, non-empty list of instructions parsed from the creation form.
///
/// # Examples
/// ```
/// use recipes_backend::domain::StepInstructions;
///
/// let steps = StepInstructions::parse("Boil water | Add pasta | Drain").unwrap();
/// assert_eq!(steps.as_slice(), ["Boil water", "Add pasta", "Drain"]);
///
/// let escaped = StepInstructions::parse(r"Mix a \| b | Serve").unwrap();
/// assert_eq!(escaped.as_slice(), ["Mix a | b", "Serve"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInstructions(Vec<String>);

impl StepInstructions {
    /// Split `raw` into trimmed instructions, honouring escapes.
    pub fn parse(raw: &str) -> Result<Self, NoStepsError> {
        let mut entries = Vec::new();
        let mut current = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                ESCAPE => match chars.peek() {
                    Some(&next) if next == STEP_DELIMITER || next == ESCAPE => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push(ESCAPE),
                },
                STEP_DELIMITER => entries.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        entries.push(current);

        let instructions: Vec<String> = entries
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect();

        if instructions.is_empty() {
            return Err(NoStepsError);
        }
        Ok(Self(instructions))
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no instructions; never true for a parsed value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Instructions in submission order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Attach the instructions to `recipe_id`, numbered from 1.
    pub fn into_new_steps(self, recipe_id: RecipeId) -> Vec<NewStep> {
        (1_u32..)
            .zip(self.0)
            .map(|(step_number, instruction)| NewStep {
                recipe_id,
                step_number,
                instruction,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
