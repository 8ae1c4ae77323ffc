use actix_web::web;

use crate::controller;

pub fn recipe_routes() -> actix_web::Scope {
    web::scope("/users/me")
        .service(controller::recipes::generate_recipe)
        .service(controller::recipes::create_recipe)
        .service(controller::recipes::user_preferences)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service(recipe_routes()));
}
