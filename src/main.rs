use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use healthymeal_api::middleware::{error_handler, Authentication, Logging};
use healthymeal_api::routes;
use healthymeal_api::service::completion::select_backend;
use healthymeal_api::service::recipes::{
    InMemoryRecipeStore, RecipeDraftService, RecipeService, RecipeStore,
};
use healthymeal_api::utils::init;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = init::init()
        .context("failed to initialize application")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    // The completion backend (real or mock) is resolved once per process.
    let backend = select_backend(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let store: Arc<dyn RecipeStore> = Arc::new(InMemoryRecipeStore::new());

    let draft_service = web::Data::new(RecipeDraftService::new(backend));
    let recipe_service = web::Data::new(RecipeService::new(store));
    let app_config = web::Data::from(config.clone());

    let host = config.server.host.clone();
    let port = config.server.port;
    let shutdown_timeout = config.server.shutdown_timeout;

    HttpServer::new(move || {
        App::new()
            .app_data(app_config.clone())
            .app_data(draft_service.clone())
            .app_data(recipe_service.clone())
            .wrap(Authentication)
            .wrap(Logging)
            .wrap(error_handler())
            .configure(routes::route::configure)
    })
    .client_request_timeout(std::time::Duration::from_secs(30))
    .bind((host, port))?
    .shutdown_timeout(shutdown_timeout)
    .run()
    .await
}
