use thiserror::Error;

use crate::document::validate::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} {id} not found")]
    NotFound { collection: &'static str, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid match pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("stored document could not be decoded: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn not_found(collection: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
