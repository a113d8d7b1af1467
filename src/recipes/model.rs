use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A juice recipe as it lives in the document index.
///
/// `rating` is transient: it carries a freshly submitted vote through the
/// prepare/validate steps and is never serialized. `average` and `score`
/// always stay within [0.0, 5.0]; `score` is `None` only on a record that
/// has not yet been through [`prepare`](crate::recipes::rating::prepare).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    /// Lowercased copy of `name`, used as the autocomplete source.
    pub suggest_name: String,
    pub photo: String,
    pub votes: u32,
    #[serde(skip)]
    pub rating: Option<u8>,
    pub average: f64,
    pub score: Option<f64>,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip)]
    persisted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub photo: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recipe {
    pub fn new(input: NewRecipe) -> Self {
        let suggest_name = input.name.to_lowercase();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            suggest_name,
            photo: input.photo,
            votes: 0,
            rating: None,
            average: 0.0,
            score: None,
            ingredients: input.ingredients,
            tags: input.tags,
            created_at: OffsetDateTime::now_utc(),
            persisted: false,
        }
    }

    /// Count the vote, then stage the rating for the next prepare step.
    ///
    /// The order matters: `update_average` expects `votes` to already include
    /// the vote being absorbed.
    pub fn submit_rating(&mut self, rating: u8) {
        self.votes += 1;
        self.rating = Some(rating);
    }

    /// True until the record has been written to a store at least once.
    pub fn is_new(&self) -> bool {
        !self.persisted
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = true;
    }
}
