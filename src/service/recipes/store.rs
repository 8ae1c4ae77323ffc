use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::UserPreferences;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe not found: {0}")]
    NotFound(Uuid),
    #[error("storage provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub content: String,
    pub generated_at: DateTime<Utc>,
    pub generation_duration: i64,
}

/// Opaque storage provider for persisted recipes, their diet/allergen links
/// and the user's preference record. Consistency of persisted data is the
/// provider's responsibility.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Uuid, StoreError>;
    async fn link_diets(&self, recipe_id: Uuid, diets: &[Uuid]) -> Result<(), StoreError>;
    async fn link_allergens(&self, recipe_id: Uuid, allergens: &[Uuid]) -> Result<(), StoreError>;
    async fn delete_recipe(&self, recipe_id: Uuid) -> Result<(), StoreError>;
    async fn preferences(&self) -> Result<UserPreferences, StoreError>;
}

#[derive(Debug)]
struct StoredRecipe {
    recipe: NewRecipe,
    diets: Vec<Uuid>,
    allergens: Vec<Uuid>,
}

/// In-process storage used in development and tests.
#[derive(Default)]
pub struct InMemoryRecipeStore {
    recipes: Mutex<HashMap<Uuid, StoredRecipe>>,
    preferences: Mutex<UserPreferences>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_preferences(&self, preferences: UserPreferences) {
        if let Ok(mut stored) = self.preferences.lock() {
            *stored = preferences;
        }
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.lock().map(|recipes| recipes.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.recipes
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?
            .insert(id, StoredRecipe { recipe, diets: Vec::new(), allergens: Vec::new() });
        Ok(id)
    }

    async fn link_diets(&self, recipe_id: Uuid, diets: &[Uuid]) -> Result<(), StoreError> {
        let mut recipes =
            self.recipes.lock().map_err(|err| StoreError::Unavailable(err.to_string()))?;
        let stored = recipes.get_mut(&recipe_id).ok_or(StoreError::NotFound(recipe_id))?;
        stored.diets.extend_from_slice(diets);
        Ok(())
    }

    async fn link_allergens(&self, recipe_id: Uuid, allergens: &[Uuid]) -> Result<(), StoreError> {
        let mut recipes =
            self.recipes.lock().map_err(|err| StoreError::Unavailable(err.to_string()))?;
        let stored = recipes.get_mut(&recipe_id).ok_or(StoreError::NotFound(recipe_id))?;
        stored.allergens.extend_from_slice(allergens);
        Ok(())
    }

    async fn delete_recipe(&self, recipe_id: Uuid) -> Result<(), StoreError> {
        self.recipes
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?
            .remove(&recipe_id)
            .ok_or(StoreError::NotFound(recipe_id))?;
        Ok(())
    }

    async fn preferences(&self) -> Result<UserPreferences, StoreError> {
        Ok(self
            .preferences
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?
            .clone())
    }
}
