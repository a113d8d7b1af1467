//! The validation gate: every rule checked before a record may be stored.
//!
//! Collect-all semantics: a failing record reports every offending field in
//! one [`ValidationError`], and the caller is expected to make no write.

use std::fmt;

use thiserror::Error;

use super::model::Recipe;

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    NotEmpty,
    IntegerRange { min: i64, max: i64 },
    FloatRange { min: f64, max: f64 },
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "is required"),
            Rule::NotEmpty => write!(f, "must not be empty"),
            Rule::IntegerRange { min, max } => {
                write!(f, "must be an integer in [{min}, {max}]")
            }
            Rule::FloatRange { min, max } => write!(f, "must be in [{min}, {max}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} {rule}")]
pub struct Violation {
    pub field: &'static str,
    pub rule: Rule,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", .violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn single(field: &'static str, rule: Rule) -> Self {
        Self {
            violations: vec![Violation { field, rule }],
        }
    }

    pub fn field(&self, field: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

/// Check every storage rule against the record.
///
/// Vote-count non-negativity holds by type (`u32`) and is not re-checked.
/// The rating rule is conditional: a record that already exists in a store
/// is only ever rewritten to absorb a rating, so the staged rating must be
/// present then; a brand-new record may omit it.
pub fn validate(recipe: &Recipe) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    let mut fail = |field: &'static str, rule: Rule| violations.push(Violation { field, rule });

    if recipe.name.trim().is_empty() {
        fail("name", Rule::Required);
    }
    if recipe.photo.trim().is_empty() {
        fail("photo", Rule::Required);
    }
    if recipe.ingredients.is_empty() {
        fail("ingredients", Rule::NotEmpty);
    }

    match recipe.rating {
        Some(r) if !(1..=5).contains(&r) => {
            fail("rating", Rule::IntegerRange { min: 1, max: 5 });
        }
        None if !recipe.is_new() => fail("rating", Rule::Required),
        _ => {}
    }

    if !recipe.average.is_finite() || !(0.0..=5.0).contains(&recipe.average) {
        fail("average", Rule::FloatRange { min: 0.0, max: 5.0 });
    }
    match recipe.score {
        Some(s) if s.is_finite() && (0.0..=5.0).contains(&s) => {}
        Some(_) => fail("score", Rule::FloatRange { min: 0.0, max: 5.0 }),
        None => fail("score", Rule::Required),
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
