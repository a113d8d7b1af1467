use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::store::RecipeStore;

use super::model::{NewRecipe, Recipe};

#[instrument(skip(store, input), fields(name = %input.name))]
pub async fn create_recipe(store: &dyn RecipeStore, input: NewRecipe) -> Result<Recipe> {
    let stored = store.save(Recipe::new(input)).await?;
    info!(id = %stored.id, "recipe created");
    Ok(stored)
}

#[instrument(skip(store))]
pub async fn rate_recipe(store: &dyn RecipeStore, id: Uuid, rating: u8) -> Result<Recipe> {
    let updated = store.rate(id, rating).await?;
    info!(
        id = %updated.id,
        votes = updated.votes,
        average = updated.average,
        score = ?updated.score,
        "rating absorbed"
    );
    Ok(updated)
}

pub async fn get_recipe(store: &dyn RecipeStore, id: Uuid) -> Result<Recipe> {
    store.get(id).await?.ok_or(Error::NotFound(id))
}

#[instrument(skip(store))]
pub async fn search_recipes(
    store: &dyn RecipeStore,
    query: &str,
    limit: usize,
) -> Result<Vec<Recipe>> {
    store.search(query, limit).await
}

#[instrument(skip(store))]
pub async fn suggest_names(
    store: &dyn RecipeStore,
    prefix: &str,
    limit: usize,
) -> Result<Vec<String>> {
    store.suggest(prefix, limit).await
}
