use serde::{Deserialize, Serialize};

/// Every failure the wishlist core can report.
///
/// Errors travel inside actions, so they stay cloneable and serializable.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    #[error("pokemon #{id} is already in the wishlist")]
    DuplicateEntry { id: u32 },

    #[error("malformed response: missing {0}")]
    MalformedResponse(String),

    #[error("pokemon not found: {0}")]
    NotFound(String),

    #[error("fetch failed: {0}")]
    FetchFailed(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
