use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::service::recipes::RecipeDraftService;

pub const PROMPT_MIN_CHARS: usize = 10;
pub const PROMPT_MAX_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct GenerateRecipeDraftCommand {
    pub prompt: String,
}

/// Generates a recipe draft from a free-text prompt. The draft is returned to
/// the caller only; nothing is persisted until an explicit save.
#[post("/recipes/generate")]
pub async fn generate_recipe(
    service: web::Data<RecipeDraftService>,
    command: web::Json<GenerateRecipeDraftCommand>,
) -> Result<HttpResponse, AppError> {
    let length = command.prompt.chars().count();
    if length < PROMPT_MIN_CHARS {
        return Err(AppError::Validation {
            field: "prompt".to_string(),
            message: format!("prompt must be at least {PROMPT_MIN_CHARS} characters long"),
        });
    }
    if length > PROMPT_MAX_CHARS {
        return Err(AppError::Validation {
            field: "prompt".to_string(),
            message: format!("prompt cannot exceed {PROMPT_MAX_CHARS} characters"),
        });
    }

    let draft = service.generate(&command.prompt).await?;
    log::info!(
        "generated recipe draft \"{}\" in {}ms",
        draft.title,
        draft.generation_duration
    );
    Ok(HttpResponse::Created().json(draft))
}
