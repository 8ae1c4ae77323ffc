use async_trait::async_trait;
use rust_i18n::t;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{CreateRecipeCommand, CreatedRecipe, RecipeDraft, UserPreferences};

/// User-presentable failure from the recipe API; the server's classified
/// error taxonomy does not cross this boundary.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

/// The HTTP surface the generation flow drives.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn generate_draft(&self, prompt: &str) -> Result<RecipeDraft, ApiError>;
    async fn create_recipe(&self, command: &CreateRecipeCommand) -> Result<Uuid, ApiError>;
    async fn fetch_preferences(&self) -> Result<UserPreferences, ApiError>;
}

pub struct HttpRecipeApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRecipeApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// Pulls the `error` field out of the envelope, falling back to a generic
    /// message when the body is not parseable.
    async fn error_message(response: reqwest::Response, fallback: &str) -> ApiError {
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        let message =
            body.get("error").and_then(Value::as_str).unwrap_or(fallback).to_string();
        ApiError { message }
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn generate_draft(&self, prompt: &str) -> Result<RecipeDraft, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/users/me/recipes/generate", self.base_url))
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|err| ApiError { message: err.to_string() })?;

        if !response.status().is_success() {
            return Err(Self::error_message(response, &t!("errors.generation_failed")).await);
        }
        response
            .json::<RecipeDraft>()
            .await
            .map_err(|err| ApiError { message: err.to_string() })
    }

    async fn create_recipe(&self, command: &CreateRecipeCommand) -> Result<Uuid, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/users/me/recipes", self.base_url))
            .json(command)
            .send()
            .await
            .map_err(|err| ApiError { message: err.to_string() })?;

        if !response.status().is_success() {
            return Err(Self::error_message(response, &t!("errors.save_failed")).await);
        }
        let created = response
            .json::<CreatedRecipe>()
            .await
            .map_err(|err| ApiError { message: err.to_string() })?;
        Ok(created.id)
    }

    async fn fetch_preferences(&self) -> Result<UserPreferences, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/users/me/preferences", self.base_url))
            .send()
            .await
            .map_err(|err| ApiError { message: err.to_string() })?;

        if !response.status().is_success() {
            return Err(
                Self::error_message(response, &t!("errors.preferences_unavailable")).await
            );
        }
        response
            .json::<UserPreferences>()
            .await
            .map_err(|err| ApiError { message: err.to_string() })
    }
}
