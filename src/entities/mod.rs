pub mod chat;
pub mod recipe;

pub use chat::{
    ChatCompletionOptions, ChatMessage, Choice, CompletionResult, JsonSchemaFormat,
    ResponseFormat, Role, Usage,
};
pub use recipe::{CreateRecipeCommand, CreatedRecipe, RecipeDraft, UserPreferences};
