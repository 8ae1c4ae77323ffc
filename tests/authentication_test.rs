use std::sync::Arc;
use std::time::Duration;

use actix_web::{test, web, App};

use healthymeal_api::middleware::{error_handler, Authentication, Logging, ACCESS_TOKEN_ENV};
use healthymeal_api::routes;
use healthymeal_api::service::completion::MockCompletionClient;
use healthymeal_api::service::recipes::{
    InMemoryRecipeStore, RecipeDraftService, RecipeService, RecipeStore,
};

macro_rules! app {
    () => {{
        let backend = Arc::new(MockCompletionClient::with_latency(Duration::ZERO));
        let draft_service = web::Data::new(RecipeDraftService::new(backend));
        let store: Arc<dyn RecipeStore> = Arc::new(InMemoryRecipeStore::new());
        let recipe_service = web::Data::new(RecipeService::new(store));
        test::init_service(
            App::new()
                .app_data(draft_service)
                .app_data(recipe_service)
                .wrap(Authentication)
                .wrap(Logging)
                .wrap(error_handler())
                .configure(routes::route::configure),
        )
        .await
    }};
}

// The token comes from the process environment, so every scenario runs inside
// one test to keep the variable's lifetime unambiguous.
#[actix_web::test]
async fn bearer_guard_enforces_the_configured_token() {
    std::env::remove_var(ACCESS_TOKEN_ENV);
    let app = app!();

    // No token configured: everything passes.
    let req = test::TestRequest::get().uri("/api/users/me/preferences").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    std::env::set_var(ACCESS_TOKEN_ENV, "tajny-token");

    // Missing credentials are rejected with the envelope.
    let req = test::TestRequest::get().uri("/api/users/me/preferences").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.get("error").and_then(|v| v.as_str()).is_some());

    // A wrong token is rejected too.
    let req = test::TestRequest::get()
        .uri("/api/users/me/preferences")
        .insert_header(("Authorization", "Bearer zly-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    // The matching token gets through.
    let req = test::TestRequest::get()
        .uri("/api/users/me/preferences")
        .insert_header(("Authorization", "Bearer tajny-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    std::env::remove_var(ACCESS_TOKEN_ENV);
}
