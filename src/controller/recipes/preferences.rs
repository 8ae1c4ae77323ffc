use actix_web::{get, web, HttpResponse};

use crate::error::AppError;
use crate::service::recipes::RecipeService;

/// Returns the current user's diet/allergen preference identifiers.
#[get("/preferences")]
pub async fn user_preferences(
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    let preferences = service.preferences().await?;
    Ok(HttpResponse::Ok().json(preferences))
}
