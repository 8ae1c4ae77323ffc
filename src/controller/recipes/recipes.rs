use actix_web::{post, web, HttpResponse};

use crate::entities::{CreateRecipeCommand, CreatedRecipe};
use crate::error::AppError;
use crate::service::recipes::RecipeService;

pub const TITLE_MAX_CHARS: usize = 255;

/// Persists an accepted draft together with its diet/allergen tags.
#[post("/recipes")]
pub async fn create_recipe(
    service: web::Data<RecipeService>,
    command: web::Json<CreateRecipeCommand>,
) -> Result<HttpResponse, AppError> {
    let command = command.into_inner();

    if command.title.is_empty() {
        return Err(AppError::Validation {
            field: "title".to_string(),
            message: "title is required".to_string(),
        });
    }
    if command.title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation {
            field: "title".to_string(),
            message: format!("title cannot exceed {TITLE_MAX_CHARS} characters"),
        });
    }
    if command.content.is_empty() {
        return Err(AppError::Validation {
            field: "content".to_string(),
            message: "content is required".to_string(),
        });
    }

    let id = service.create(command).await?;
    log::info!("created recipe {id}");
    Ok(HttpResponse::Created().json(CreatedRecipe { id }))
}
