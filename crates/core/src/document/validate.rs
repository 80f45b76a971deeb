/// Schema-level validation shared by every resource.
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::id::DocumentId;
use crate::store::query::Sort;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{0}` is required")]
    MissingField(&'static str),
    #[error("`{0}` cannot be empty")]
    EmptyField(&'static str),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("`{field}` references unknown document {id}")]
    UnknownReference { field: &'static str, id: DocumentId },
    #[error("invalid pagination: {0}")]
    Pagination(&'static str),
}

/// A reference from one document to another, checked before writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub collection: &'static str,
    pub id: DocumentId,
}

impl Reference {
    pub fn to<R: Resource>(field: &'static str, id: DocumentId) -> Self {
        Self {
            field,
            collection: R::COLLECTION,
            id,
        }
    }
}

/// A manageable entity type with its own collection and CRUD surface.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the documents live in.
    const COLLECTION: &'static str;

    /// Page size applied when a listing is always paginated.
    const PAGE_LIMIT: Option<u64> = None;

    /// Order used by listings.
    fn default_sort() -> Sort {
        Sort::newest_first()
    }

    /// Fill derived fields before validation.
    fn normalize(&mut self) {}

    fn validate(&self) -> Result<(), ValidationError>;

    /// Documents this one points at. Each must exist for a write to succeed.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}

/// Require a non-blank text field.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

/// Require an optional text field to be present and non-blank.
pub fn require_present(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(value) => require(field, value),
    }
}
