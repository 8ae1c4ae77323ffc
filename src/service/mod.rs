pub mod completion;
pub mod recipes;
