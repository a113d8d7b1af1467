use thiserror::Error;
use uuid::Uuid;

pub use crate::recipes::validate::{Rule, ValidationError, Violation};

#[derive(Error, Debug)]
pub enum Error {
    /// One or more field constraints failed; nothing was written.
    /// Recoverable: correct the record and resubmit.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A rating calculation was invoked out of order (e.g. before the vote
    /// was counted). This is a bug in the calling code, not user input.
    #[error("precondition violated: {0}")]
    Precondition(&'static str),

    #[error("recipe {0} not found")]
    NotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, Error>;
