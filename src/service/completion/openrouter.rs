use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value};

use super::{CompletionBackend, CompletionError};
use crate::entities::{ChatCompletionOptions, CompletionResult};
use crate::utils::config::OpenRouterConfig;

/// Client for an OpenRouter-compatible chat-completion API. Performs exactly
/// one outbound call per invocation and classifies failures by status code.
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    default_model: String,
    default_params: Map<String, Value>,
}

impl OpenRouterClient {
    /// Fails before any network activity when the credential is empty.
    pub fn new(api_key: &str, config: &OpenRouterConfig) -> Result<Self, CompletionError> {
        if api_key.is_empty() {
            return Err(CompletionError::Authentication("an API key is required".to_string()));
        }

        let mut default_params = Map::new();
        default_params.insert("max_tokens".to_string(), config.defaults.max_tokens.into());
        default_params.insert("temperature".to_string(), config.defaults.temperature.into());

        Ok(Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_model: config.default_model.clone(),
            default_params,
        })
    }

    /// Merges, in increasing precedence: default model and parameters, then
    /// caller-supplied overrides, then the response-format directive.
    fn build_payload(&self, options: &ChatCompletionOptions) -> Map<String, Value> {
        let mut payload = Map::new();
        let model =
            options.model.clone().unwrap_or_else(|| self.default_model.clone());
        payload.insert("model".to_string(), Value::String(model));
        payload.insert("messages".to_string(), serde_json::json!(options.messages));
        for (key, value) in &self.default_params {
            payload.insert(key.clone(), value.clone());
        }
        for (key, value) in &options.params {
            payload.insert(key.clone(), value.clone());
        }
        if let Some(format) = &options.response_format {
            payload.insert("response_format".to_string(), serde_json::json!(format));
        }
        payload
    }

    fn classify_status(status: StatusCode, body: &Value) -> CompletionError {
        match status.as_u16() {
            401 => CompletionError::Authentication("invalid API key".to_string()),
            429 => CompletionError::RateLimit("rate limit exceeded".to_string()),
            code if code >= 500 => CompletionError::Network {
                message: "upstream completion API error".to_string(),
                status: Some(code),
                retryable: true,
            },
            code => {
                let message = body
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown completion error")
                    .to_string();
                CompletionError::Network { message, status: Some(code), retryable: false }
            }
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterClient {
    async fn create_chat_completion(
        &self,
        options: ChatCompletionOptions,
    ) -> Result<CompletionResult, CompletionError> {
        let payload = self.build_payload(&options);

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("X-Title", "HealthyMeal")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            return Err(Self::classify_status(status, &body));
        }

        let data = response
            .json::<Value>()
            .await
            .map_err(|err| CompletionError::Validation(err.to_string()))?;
        if !data.is_object() {
            return Err(CompletionError::Validation(
                "response body is not an object".to_string(),
            ));
        }
        serde_json::from_value(data).map_err(|err| CompletionError::Validation(err.to_string()))
    }
}
