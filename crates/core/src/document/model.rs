use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::DocumentId;

/// A resource document as returned by the API.
/// System fields sit beside the resource's own fields in one flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: T,
}

/// Raw stored representation. Maps to a row of the `documents` table.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub collection: String,
    pub content: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T> Document<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Document<U> {
        Document {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            body: f(self.body),
        }
    }
}

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub id: DocumentId,
    pub deleted: bool,
}

impl DeleteAck {
    pub fn new(id: DocumentId) -> Self {
        Self { id, deleted: true }
    }
}
