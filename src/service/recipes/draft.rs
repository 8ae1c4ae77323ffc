use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::entities::{ChatCompletionOptions, ChatMessage, RecipeDraft};
use crate::error::AppError;
use crate::service::completion::CompletionBackend;

/// Persona instruction sent as the first message of every generation request.
const SYSTEM_PROMPT: &str = "You are an experienced chef and nutritionist. \
Write a recipe in Polish, formatted as Markdown. Start with the recipe title \
as a level-1 heading, then list the ingredients with quantities, then give \
numbered preparation steps, and finish with optional notes.";

/// Turns a free-text prompt into a `RecipeDraft`. Prompt length constraints
/// are enforced at the request-validation boundary, not here.
pub struct RecipeDraftService {
    backend: Arc<dyn CompletionBackend>,
}

impl RecipeDraftService {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Generates a draft. All completion failure kinds collapse into the one
    /// generic generation error here; the classified kind is only logged.
    pub async fn generate(&self, prompt: &str) -> Result<RecipeDraft, AppError> {
        let started = Instant::now();

        let options = ChatCompletionOptions {
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            ..Default::default()
        };

        let result = self.backend.create_chat_completion(options).await.map_err(|err| {
            log::warn!("completion request failed (retryable: {}): {}", err.retryable(), err);
            AppError::Generation
        })?;

        let content = match result.choices.first() {
            Some(choice) if !choice.message.content.trim().is_empty() => {
                choice.message.content.clone()
            }
            _ => {
                log::warn!("completion response {} contained no message content", result.id);
                return Err(AppError::Generation);
            }
        };

        let title = match extract_title(&content) {
            Some(title) => title,
            None => {
                log::warn!("completion response {} yielded no usable title line", result.id);
                return Err(AppError::Generation);
            }
        };

        Ok(RecipeDraft {
            title,
            content,
            generated_at: Utc::now(),
            generation_duration: started.elapsed().as_millis() as i64,
        })
    }
}

/// Derives the draft title from the first content line, stripping leading
/// `#` heading markers and surrounding whitespace. When the first line carries
/// no text, falls back to the first non-empty line.
pub fn extract_title(content: &str) -> Option<String> {
    content
        .lines()
        .map(|line| line.trim_start_matches('#').trim())
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
