use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::{CompletionBackend, CompletionError};
use crate::entities::{
    ChatCompletionOptions, ChatMessage, Choice, CompletionResult, Role, Usage,
};

const CHOCOLATE_CAKE: &str = "# Ciasto czekoladowe bez glutenu\n\n## Składniki:\n- 200g mąki bezglutenowej\n- 100g kakao\n- 200g cukru\n\n## Przygotowanie:\n1. Wymieszaj suche składniki\n2. Dodaj mokre składniki\n3. Piecz 30 minut w 180°C";

const TOMATO_SOUP: &str = "# Zupa pomidorowa\n\n## Składniki:\n- 1kg pomidorów\n- 1 cebula\n- Bulion warzywny\n\n## Przygotowanie:\n1. Podsmaż cebulę\n2. Dodaj pomidory\n3. Gotuj 20 minut";

/// Canned recipes keyed by a case-insensitive prompt substring. The first
/// entry doubles as the fallback when no keyword matches.
const CANNED_RECIPES: [(&str, &str); 2] =
    [("ciasto czekoladowe", CHOCOLATE_CAKE), ("zupa pomidorowa", TOMATO_SOUP)];

/// Offline stand-in for the completion API, used in development and tests.
/// Never fails.
pub struct MockCompletionClient {
    latency: Duration,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self { latency: Duration::from_secs(1) }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn pick_recipe(prompt: &str) -> &'static str {
        let prompt = prompt.to_lowercase();
        CANNED_RECIPES
            .iter()
            .find(|(keyword, _)| prompt.contains(keyword))
            .map(|(_, recipe)| *recipe)
            .unwrap_or(CHOCOLATE_CAKE)
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for MockCompletionClient {
    async fn create_chat_completion(
        &self,
        options: ChatCompletionOptions,
    ) -> Result<CompletionResult, CompletionError> {
        // Emulate upstream latency.
        tokio::time::sleep(self.latency).await;

        let prompt = options
            .messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
            .unwrap_or("");

        Ok(CompletionResult {
            id: "mock-completion-id".to_string(),
            created: Utc::now().timestamp(),
            model: options.model.unwrap_or_else(|| "gpt-4o-mini".to_string()),
            usage: Usage { prompt_tokens: 10, completion_tokens: 50, total_tokens: 60 },
            choices: vec![Choice {
                message: ChatMessage {
                    role: Role::Assistant,
                    content: Self::pick_recipe(prompt).to_string(),
                },
                finish_reason: "stop".to_string(),
                index: 0,
            }],
        })
    }
}
