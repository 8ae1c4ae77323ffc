use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use healthymeal_api::entities::{
    ChatCompletionOptions, ChatMessage, Choice, CompletionResult, Role, Usage,
};
use healthymeal_api::error::AppError;
use healthymeal_api::service::completion::{
    CompletionBackend, CompletionError, MockCompletionClient,
};
use healthymeal_api::service::recipes::{extract_title, RecipeDraftService};

/// Backend returning a fixed completion content, or a classified error.
struct CannedBackend {
    content: Option<String>,
    error: Option<fn() -> CompletionError>,
}

impl CannedBackend {
    fn content(content: &str) -> Self {
        Self { content: Some(content.to_string()), error: None }
    }

    fn failing(error: fn() -> CompletionError) -> Self {
        Self { content: None, error: Some(error) }
    }
}

#[async_trait]
impl CompletionBackend for CannedBackend {
    async fn create_chat_completion(
        &self,
        options: ChatCompletionOptions,
    ) -> Result<CompletionResult, CompletionError> {
        if let Some(error) = self.error {
            return Err(error());
        }
        Ok(CompletionResult {
            id: "canned".to_string(),
            created: Utc::now().timestamp(),
            model: options.model.unwrap_or_else(|| "gpt-4o-mini".to_string()),
            usage: Usage::default(),
            choices: self
                .content
                .iter()
                .map(|content| Choice {
                    message: ChatMessage { role: Role::Assistant, content: content.clone() },
                    finish_reason: "stop".to_string(),
                    index: 0,
                })
                .collect(),
        })
    }
}

#[test]
fn title_is_extracted_from_a_heading_line() {
    assert_eq!(extract_title("# My Recipe\n\nBody"), Some("My Recipe".to_string()));
}

#[test]
fn title_extraction_is_idempotent_on_well_formed_input() {
    let first = extract_title("# My Recipe\n\nBody").unwrap();
    assert_eq!(extract_title(&first), Some(first.clone()));
}

#[test]
fn title_extraction_skips_leading_blank_lines() {
    assert_eq!(extract_title("\n\n## Zupa krem\nreszta"), Some("Zupa krem".to_string()));
}

#[test]
fn title_extraction_yields_nothing_for_blank_content() {
    assert_eq!(extract_title("\n\n   \n###\n"), None);
}

#[actix_web::test]
async fn generates_a_fully_populated_draft_from_the_mock_backend() {
    let backend = Arc::new(MockCompletionClient::with_latency(Duration::ZERO));
    let service = RecipeDraftService::new(backend);

    let before = Utc::now();
    let draft = service
        .generate("Prosty przepis na ciasto czekoladowe bez glutenu")
        .await
        .unwrap();

    assert_eq!(draft.title, "Ciasto czekoladowe bez glutenu");
    assert!(draft.content.contains("mąki bezglutenowej"));
    assert!(draft.generation_duration >= 0);
    assert!(draft.generated_at >= before);
}

#[actix_web::test]
async fn classified_backend_errors_collapse_into_a_generic_failure() {
    for error in [
        (|| CompletionError::Authentication("bad key".to_string())) as fn() -> CompletionError,
        || CompletionError::RateLimit("slow down".to_string()),
        || CompletionError::Network {
            message: "boom".to_string(),
            status: Some(500),
            retryable: true,
        },
        || CompletionError::Validation("garbage".to_string()),
    ] {
        let service = RecipeDraftService::new(Arc::new(CannedBackend::failing(error)));
        let err = service.generate("Przepis na zupę pomidorową").await.unwrap_err();
        assert!(matches!(err, AppError::Generation));
    }
}

#[actix_web::test]
async fn empty_completion_content_is_a_generation_failure() {
    let service = RecipeDraftService::new(Arc::new(CannedBackend::content("   \n  ")));
    let err = service.generate("Przepis na zupę pomidorową").await.unwrap_err();
    assert!(matches!(err, AppError::Generation));
}

#[actix_web::test]
async fn title_falls_back_to_the_first_non_empty_line() {
    let service =
        RecipeDraftService::new(Arc::new(CannedBackend::content("\n\n# Tytuł przepisu\ntreść")));
    let draft = service.generate("Przepis na zupę pomidorową").await.unwrap();
    assert_eq!(draft.title, "Tytuł przepisu");
}
