use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An unsaved, AI-generated recipe. Exists only between generation and the
/// user's save-or-discard decision; it is never mutated, only replaced or
/// discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    /// Markdown body of the recipe.
    pub content: String,
    pub generated_at: DateTime<Utc>,
    /// Wall-clock generation time in milliseconds, always non-negative.
    pub generation_duration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRecipeCommand {
    pub title: String,
    pub content: String,
    pub diets: Vec<Uuid>,
    pub allergens: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRecipe {
    pub id: Uuid,
}

/// Diet and allergen identifiers attached to persisted recipes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub diets: Vec<Uuid>,
    pub allergens: Vec<Uuid>,
}
