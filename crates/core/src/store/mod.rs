//! Document storage.
//!
//! `DocumentStore` dispatches to a backend: PostgreSQL (JSONB rows) in
//! production, or the in-memory store for tests and local runs. Typed access
//! goes through [`Collection`].

pub mod collection;
pub mod error;
pub mod join;
pub mod memory;
pub mod page;
pub mod postgres;
pub mod query;

use serde_json::Value;

use crate::document::id::DocumentId;
use crate::document::model::StoredDocument;
use crate::document::validate::Resource;

pub use collection::Collection;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use page::{Page, PageRequest};
pub use postgres::PgStore;
pub use query::{Condition, Query, Sort};

#[derive(Debug, Clone)]
pub enum DocumentStore {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl DocumentStore {
    pub fn memory() -> Self {
        DocumentStore::Memory(MemoryStore::new())
    }

    /// Typed access to one resource's collection.
    pub fn collection<R: Resource>(&self) -> Collection<'_, R> {
        Collection::new(self)
    }

    pub fn backend(&self) -> &'static str {
        match self {
            DocumentStore::Memory(_) => "memory",
            DocumentStore::Postgres(_) => "postgres",
        }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        match self {
            DocumentStore::Memory(_) => Ok(()),
            DocumentStore::Postgres(store) => store.ping().await,
        }
    }

    pub async fn insert(&self, collection: &str, content: Value) -> StoreResult<StoredDocument> {
        match self {
            DocumentStore::Memory(store) => store.insert(collection, content).await,
            DocumentStore::Postgres(store) => store.insert(collection, content).await,
        }
    }

    pub async fn get(&self, collection: &str, id: DocumentId) -> StoreResult<Option<StoredDocument>> {
        match self {
            DocumentStore::Memory(store) => store.get(collection, id).await,
            DocumentStore::Postgres(store) => store.get(collection, id).await,
        }
    }

    pub async fn find(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        match self {
            DocumentStore::Memory(store) => store.find(collection, query).await,
            DocumentStore::Postgres(store) => store.find(collection, query).await,
        }
    }

    pub async fn count(&self, collection: &str, conditions: &[Condition]) -> StoreResult<u64> {
        match self {
            DocumentStore::Memory(store) => store.count(collection, conditions).await,
            DocumentStore::Postgres(store) => store.count(collection, conditions).await,
        }
    }

    /// Replace a document's content. `None` when the id does not exist.
    pub async fn replace(
        &self,
        collection: &str,
        id: DocumentId,
        content: Value,
    ) -> StoreResult<Option<StoredDocument>> {
        match self {
            DocumentStore::Memory(store) => store.replace(collection, id, content).await,
            DocumentStore::Postgres(store) => store.replace(collection, id, content).await,
        }
    }

    /// Remove a document, returning what was removed.
    pub async fn delete(&self, collection: &str, id: DocumentId) -> StoreResult<Option<StoredDocument>> {
        match self {
            DocumentStore::Memory(store) => store.delete(collection, id).await,
            DocumentStore::Postgres(store) => store.delete(collection, id).await,
        }
    }
}

impl From<MemoryStore> for DocumentStore {
    fn from(store: MemoryStore) -> Self {
        DocumentStore::Memory(store)
    }
}

impl From<PgStore> for DocumentStore {
    fn from(store: PgStore) -> Self {
        DocumentStore::Postgres(store)
    }
}
