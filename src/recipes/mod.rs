pub mod model;
pub mod rating;
pub mod services;
pub mod validate;

pub use model::{NewRecipe, Recipe};
