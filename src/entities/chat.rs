use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Structured-output directive forwarded verbatim to the completion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: serde_json::Value,
}

/// One chat-completion request. The message order is meaningful: the system
/// message comes first.
#[derive(Debug, Clone, Default)]
pub struct ChatCompletionOptions {
    pub messages: Vec<ChatMessage>,
    pub model: Option<String>,
    pub params: serde_json::Map<String, serde_json::Value>,
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: String,
    #[serde(default)]
    pub index: u32,
}

/// Read-only completion response. Only `choices[0].message.content` is
/// consumed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    pub id: String,
    pub created: i64,
    pub model: String,
    #[serde(default)]
    pub usage: Usage,
    pub choices: Vec<Choice>,
}
