use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::recipes::model::Recipe;
use crate::recipes::rating::prepare;
use crate::recipes::validate::{validate, Rule, ValidationError};

/// Validate-then-store boundary toward the document index.
///
/// Implementations own the concurrency story: `rate` must apply each
/// submitted rating to the latest votes/average pair, via either a
/// compare-and-swap write or a serialized per-record update path. Two
/// ratings computed from the same stale snapshot would silently drop one.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Recipe>>;

    /// Run the pre-write step and the validation gate, then persist.
    /// On validation failure nothing is written.
    async fn save(&self, recipe: Recipe) -> Result<Recipe>;

    /// Absorb one rating into an existing record, atomically with respect
    /// to other calls for the same id.
    async fn rate(&self, id: Uuid, rating: u8) -> Result<Recipe>;

    /// Full-text match over name/ingredients/tags, ranked by score
    /// descending.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Recipe>>;

    /// Autocomplete recipe names from their suggest field.
    async fn suggest(&self, prefix: &str, limit: usize) -> Result<Vec<String>>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// In-memory store. The whole index sits behind one `RwLock`; `rate` holds
/// the write lock across its read-modify-write, which is the serialized
/// update path the trait demands.
pub struct MemoryStore {
    index: String,
    records: RwLock<HashMap<Uuid, Recipe>>,
}

impl MemoryStore {
    pub fn new(index: &str) -> Self {
        Self {
            index: index.to_string(),
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<Recipe>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn save(&self, mut recipe: Recipe) -> Result<Recipe> {
        prepare(&mut recipe)?;
        validate(&recipe)?;
        recipe.rating = None; // transient, never persisted
        recipe.mark_persisted();

        let mut records = self.records.write().await;
        records.insert(recipe.id, recipe.clone());
        debug!(index = %self.index, id = %recipe.id, "recipe stored");
        Ok(recipe)
    }

    async fn rate(&self, id: Uuid, rating: u8) -> Result<Recipe> {
        // User input, not a caller bug: reject out-of-range ratings as a
        // validation failure before touching the record.
        if !(1..=5).contains(&rating) {
            return Err(ValidationError::single(
                "rating",
                Rule::IntegerRange { min: 1, max: 5 },
            )
            .into());
        }

        let mut records = self.records.write().await;
        let mut updated = records.get(&id).ok_or(Error::NotFound(id))?.clone();
        updated.submit_rating(rating);
        prepare(&mut updated)?;
        validate(&updated)?;
        updated.rating = None;

        records.insert(id, updated.clone());
        debug!(
            index = %self.index,
            id = %id,
            votes = updated.votes,
            average = updated.average,
            "rating absorbed"
        );
        Ok(updated)
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Recipe>> {
        let needle = query.to_lowercase();
        let records = self.records.read().await;
        let mut hits: Vec<Recipe> = records
            .values()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.ingredients.iter().any(|i| i.to_lowercase().contains(&needle))
                    || r.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.score.unwrap_or(0.0).total_cmp(&a.score.unwrap_or(0.0)));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn suggest(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let needle = prefix.to_lowercase();
        let records = self.records.read().await;
        let mut names: Vec<(f64, String)> = records
            .values()
            .filter(|r| r.suggest_name.starts_with(&needle))
            .map(|r| (r.score.unwrap_or(0.0), r.name.clone()))
            .collect();
        names.sort_by(|a, b| b.0.total_cmp(&a.0));
        names.truncate(limit);
        Ok(names.into_iter().map(|(_, name)| name).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut records = self.records.write().await;
        records.remove(&id).ok_or(Error::NotFound(id))?;
        Ok(())
    }
}
