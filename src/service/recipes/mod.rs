pub mod draft;
pub mod store;

pub use draft::{extract_title, RecipeDraftService};
pub use store::{InMemoryRecipeStore, NewRecipe, RecipeStore, StoreError};

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::entities::{CreateRecipeCommand, UserPreferences};
use crate::error::AppError;

/// Persists accepted drafts through the storage provider.
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Creates a recipe and links its diet/allergen tags. A failed link rolls
    /// the created record back with a compensating delete, not a transaction.
    pub async fn create(&self, command: CreateRecipeCommand) -> Result<Uuid, AppError> {
        let record = NewRecipe {
            title: command.title,
            content: command.content,
            generated_at: Utc::now(),
            // Manual save, not a timed generation.
            generation_duration: 0,
        };

        let recipe_id = self.store.insert_recipe(record).await.map_err(|err| {
            log::error!("failed to create recipe: {err}");
            AppError::Storage("failed to create recipe".to_string())
        })?;

        if !command.diets.is_empty() {
            if let Err(err) = self.store.link_diets(recipe_id, &command.diets).await {
                log::error!("failed to link diets for recipe {recipe_id}: {err}");
                self.rollback(recipe_id).await;
                return Err(AppError::Storage("failed to link diets to recipe".to_string()));
            }
        }

        if !command.allergens.is_empty() {
            if let Err(err) = self.store.link_allergens(recipe_id, &command.allergens).await {
                log::error!("failed to link allergens for recipe {recipe_id}: {err}");
                self.rollback(recipe_id).await;
                return Err(AppError::Storage("failed to link allergens to recipe".to_string()));
            }
        }

        Ok(recipe_id)
    }

    pub async fn preferences(&self) -> Result<UserPreferences, AppError> {
        self.store.preferences().await.map_err(|err| {
            log::error!("failed to fetch user preferences: {err}");
            AppError::Storage("failed to fetch user preferences".to_string())
        })
    }

    async fn rollback(&self, recipe_id: Uuid) {
        if let Err(err) = self.store.delete_recipe(recipe_id).await {
            log::error!("failed to roll back recipe {recipe_id}: {err}");
        }
    }
}
