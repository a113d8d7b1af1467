pub mod config;
pub mod error;
pub mod recipes;
pub mod store;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use recipes::model::{NewRecipe, Recipe};
pub use store::{MemoryStore, RecipeStore};
