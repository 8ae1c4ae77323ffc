pub mod mock;
pub mod openrouter;

pub use mock::MockCompletionClient;
pub use openrouter::OpenRouterClient;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::{ChatCompletionOptions, CompletionResult};
use crate::utils::config::AppConfig;

/// Closed set of failure kinds a completion backend can surface. Every error
/// crossing the backend boundary is one of these four; anything unclassified
/// is normalized into a non-retryable `Network` failure first.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("rate limit exceeded: {0}")]
    RateLimit(String),
    #[error("network error: {message}")]
    Network { message: String, status: Option<u16>, retryable: bool },
    #[error("invalid completion response: {0}")]
    Validation(String),
}

impl CompletionError {
    /// Whether the same request may succeed if attempted again later.
    pub fn retryable(&self) -> bool {
        match self {
            CompletionError::RateLimit(_) => true,
            CompletionError::Network { retryable, .. } => *retryable,
            CompletionError::Authentication(_) | CompletionError::Validation(_) => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CompletionError::Network { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Network {
            message: err.to_string(),
            status: err.status().map(|status| status.as_u16()),
            retryable: false,
        }
    }
}

/// One request/response exchange with a hosted language model. No retries are
/// performed internally; retry policy belongs to the caller.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn create_chat_completion(
        &self,
        options: ChatCompletionOptions,
    ) -> Result<CompletionResult, CompletionError>;
}

/// Resolves the completion backend once at process start: the explicit mock
/// flag or a missing API credential selects the offline mock.
pub fn select_backend(config: &AppConfig) -> anyhow::Result<Arc<dyn CompletionBackend>> {
    if config.openrouter.use_mock {
        log::info!("using the mock completion backend (openrouter.use_mock is set)");
        return Ok(Arc::new(MockCompletionClient::new()));
    }

    match config.api_key() {
        Some(api_key) => {
            let client = OpenRouterClient::new(&api_key, &config.openrouter)
                .map_err(|err| anyhow::anyhow!("failed to construct completion client: {err}"))?;
            log::info!(
                "using the OpenRouter completion backend at {}",
                config.openrouter.base_url
            );
            Ok(Arc::new(client))
        }
        None => {
            log::warn!("no API credential configured, falling back to the mock completion backend");
            Ok(Arc::new(MockCompletionClient::new()))
        }
    }
}
