pub mod api;
pub mod flow;

pub use api::{ApiError, HttpRecipeApi, RecipeApi};
pub use flow::{GenerationFlow, GenerationState};
