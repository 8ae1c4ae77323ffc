use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use uuid::Uuid;

use healthymeal_api::entities::{CreateRecipeCommand, UserPreferences};
use healthymeal_api::error::AppError;
use healthymeal_api::service::recipes::{NewRecipe, RecipeService, RecipeStore, StoreError};

mock! {
    Store {}

    #[async_trait]
    impl RecipeStore for Store {
        async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Uuid, StoreError>;
        async fn link_diets(&self, recipe_id: Uuid, diets: &[Uuid]) -> Result<(), StoreError>;
        async fn link_allergens(&self, recipe_id: Uuid, allergens: &[Uuid]) -> Result<(), StoreError>;
        async fn delete_recipe(&self, recipe_id: Uuid) -> Result<(), StoreError>;
        async fn preferences(&self) -> Result<UserPreferences, StoreError>;
    }
}

fn command() -> CreateRecipeCommand {
    CreateRecipeCommand {
        title: "Zupa pomidorowa".to_string(),
        content: "# Zupa pomidorowa\ntreść".to_string(),
        diets: vec![Uuid::new_v4()],
        allergens: vec![Uuid::new_v4()],
    }
}

#[actix_web::test]
async fn create_links_tags_after_inserting() {
    let recipe_id = Uuid::new_v4();
    let mut store = MockStore::new();
    store.expect_insert_recipe().times(1).returning(move |_| Ok(recipe_id));
    store.expect_link_diets().with(eq(recipe_id), mockall::predicate::always()).times(1).returning(|_, _| Ok(()));
    store.expect_link_allergens().with(eq(recipe_id), mockall::predicate::always()).times(1).returning(|_, _| Ok(()));
    store.expect_delete_recipe().times(0);

    let service = RecipeService::new(Arc::new(store));
    assert_eq!(service.create(command()).await.unwrap(), recipe_id);
}

#[actix_web::test]
async fn failed_diet_link_rolls_the_recipe_back() {
    let recipe_id = Uuid::new_v4();
    let mut store = MockStore::new();
    store.expect_insert_recipe().times(1).returning(move |_| Ok(recipe_id));
    store
        .expect_link_diets()
        .times(1)
        .returning(|_, _| Err(StoreError::Unavailable("link failed".to_string())));
    store.expect_link_allergens().times(0);
    store.expect_delete_recipe().with(eq(recipe_id)).times(1).returning(|_| Ok(()));

    let service = RecipeService::new(Arc::new(store));
    let err = service.create(command()).await.unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));
}

#[actix_web::test]
async fn failed_allergen_link_rolls_the_recipe_back() {
    let recipe_id = Uuid::new_v4();
    let mut store = MockStore::new();
    store.expect_insert_recipe().times(1).returning(move |_| Ok(recipe_id));
    store.expect_link_diets().times(1).returning(|_, _| Ok(()));
    store
        .expect_link_allergens()
        .times(1)
        .returning(|_, _| Err(StoreError::Unavailable("link failed".to_string())));
    store.expect_delete_recipe().with(eq(recipe_id)).times(1).returning(|_| Ok(()));

    let service = RecipeService::new(Arc::new(store));
    let err = service.create(command()).await.unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));
}

#[actix_web::test]
async fn empty_tag_lists_skip_the_link_calls() {
    let recipe_id = Uuid::new_v4();
    let mut store = MockStore::new();
    store.expect_insert_recipe().times(1).returning(move |_| Ok(recipe_id));
    store.expect_link_diets().times(0);
    store.expect_link_allergens().times(0);
    store.expect_delete_recipe().times(0);

    let service = RecipeService::new(Arc::new(store));
    let command = CreateRecipeCommand {
        title: "Zupa".to_string(),
        content: "treść".to_string(),
        diets: vec![],
        allergens: vec![],
    };
    assert_eq!(service.create(command).await.unwrap(), recipe_id);
}
