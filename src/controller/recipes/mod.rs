pub mod generate;
pub mod preferences;
pub mod recipes;

pub use generate::generate_recipe;
pub use preferences::user_preferences;
pub use recipes::create_recipe;
