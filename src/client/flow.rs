use std::sync::Arc;
use std::time::Duration;

use rust_i18n::t;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::api::RecipeApi;
use crate::entities::{CreateRecipeCommand, RecipeDraft, UserPreferences};

/// Delay between a successful save and the navigation callback, so the
/// success indicator can render before the view changes.
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(1500);

/// The generation flow as an explicit finite-state value. Transitions:
/// `Idle -> Generating -> {Drafted, GenerationFailed}`; from `Drafted`:
/// `Saving -> {Saved, SaveFailed}`, or discard back to `Idle`.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationState {
    Idle,
    Generating,
    Drafted { draft: RecipeDraft },
    GenerationFailed { error: String },
    Saving { draft: RecipeDraft },
    Saved { draft: RecipeDraft, recipe_id: Uuid },
    SaveFailed { draft: RecipeDraft, error: String },
}

type Navigator = Arc<dyn Fn(Uuid) + Send + Sync>;

/// UI-bound state holder driving generate/save/discard against the recipe
/// API. Methods take `&mut self`, so a second `generate_recipe` cannot race
/// an outstanding one through the same flow value.
pub struct GenerationFlow {
    api: Arc<dyn RecipeApi>,
    state: GenerationState,
    /// `None` until `load_preferences` completes; a failed load blocks saves.
    preferences: Option<Result<UserPreferences, String>>,
    navigator: Option<Navigator>,
    navigation: Option<JoinHandle<()>>,
}

impl GenerationFlow {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self {
            api,
            state: GenerationState::Idle,
            preferences: None,
            navigator: None,
            navigation: None,
        }
    }

    pub fn with_navigator(
        mut self,
        navigator: impl Fn(Uuid) + Send + Sync + 'static,
    ) -> Self {
        self.navigator = Some(Arc::new(navigator));
        self
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn recipe_draft(&self) -> Option<&RecipeDraft> {
        match &self.state {
            GenerationState::Drafted { draft }
            | GenerationState::Saving { draft }
            | GenerationState::Saved { draft, .. }
            | GenerationState::SaveFailed { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn is_recipe_preview_visible(&self) -> bool {
        self.recipe_draft().is_some()
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.state, GenerationState::Generating)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.state, GenerationState::Saving { .. })
    }

    pub fn generation_error(&self) -> Option<&str> {
        match &self.state {
            GenerationState::GenerationFailed { error } => Some(error),
            _ => None,
        }
    }

    pub fn save_error(&self) -> Option<&str> {
        match &self.state {
            GenerationState::SaveFailed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn saved_recipe_id(&self) -> Option<Uuid> {
        match &self.state {
            GenerationState::Saved { recipe_id, .. } => Some(*recipe_id),
            _ => None,
        }
    }

    pub async fn load_preferences(&mut self) {
        let result = self.api.fetch_preferences().await.map_err(|err| err.message);
        if let Err(error) = &result {
            log::warn!("failed to load user preferences: {error}");
        }
        self.preferences = Some(result);
    }

    pub async fn generate_recipe(&mut self, prompt: &str) {
        self.state = GenerationState::Generating;
        match self.api.generate_draft(prompt).await {
            Ok(draft) => self.state = GenerationState::Drafted { draft },
            Err(err) => self.state = GenerationState::GenerationFailed { error: err.message },
        }
    }

    /// No-op without a draft. When the preference load failed, fails locally
    /// without touching the network.
    pub async fn save_recipe(&mut self) {
        let draft = match self.recipe_draft() {
            Some(draft) => draft.clone(),
            None => return,
        };

        if let Some(Err(_)) = &self.preferences {
            self.state = GenerationState::SaveFailed {
                draft,
                error: t!("errors.preferences_unavailable").into_owned(),
            };
            return;
        }
        let preferences = match &self.preferences {
            Some(Ok(preferences)) => preferences.clone(),
            _ => UserPreferences::default(),
        };

        self.state = GenerationState::Saving { draft: draft.clone() };
        let command = CreateRecipeCommand {
            title: draft.title.clone(),
            content: draft.content.clone(),
            diets: preferences.diets,
            allergens: preferences.allergens,
        };

        match self.api.create_recipe(&command).await {
            Ok(recipe_id) => {
                self.state = GenerationState::Saved { draft, recipe_id };
                self.schedule_navigation(recipe_id);
            }
            Err(err) => self.state = GenerationState::SaveFailed { draft, error: err.message },
        }
    }

    /// Clears the draft and all save state without calling any endpoint.
    pub fn discard_recipe(&mut self) {
        self.cancel_navigation();
        self.state = GenerationState::Idle;
    }

    fn schedule_navigation(&mut self, recipe_id: Uuid) {
        self.cancel_navigation();
        let Some(navigator) = self.navigator.clone() else {
            return;
        };
        self.navigation = Some(tokio::spawn(async move {
            tokio::time::sleep(NAVIGATION_DELAY).await;
            navigator(recipe_id);
        }));
    }

    fn cancel_navigation(&mut self) {
        if let Some(task) = self.navigation.take() {
            task.abort();
        }
    }
}

impl Drop for GenerationFlow {
    // The pending navigation must not fire against a torn-down flow.
    fn drop(&mut self) {
        self.cancel_navigation();
    }
}
