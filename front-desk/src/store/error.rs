use thiserror::Error;

use super::Collection;

/// Entity store errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{collection} not found: {id}")]
    NotFound { collection: Collection, id: String },

    #[error("{collection} already exists: {id}")]
    Duplicate { collection: Collection, id: String },

    /// The store moved on since the transaction began
    #[error("Stale write: transaction based on revision {base}, store is at {current}")]
    StaleWrite { base: u64, current: u64 },
}

impl StoreError {
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            collection,
            id: id.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
