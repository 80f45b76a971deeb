use std::marker::PhantomData;

use serde_json::{Map, Value};

use super::error::{StoreError, StoreResult};
use super::page::{Page, PageRequest};
use super::query::{Condition, Query};
use super::DocumentStore;
use crate::document::id::DocumentId;
use crate::document::model::{Document, StoredDocument};
use crate::document::validate::{Resource, ValidationError};

/// Typed view of one resource's collection.
///
/// Every write runs the resource's normalize/validate hooks and checks that
/// referenced documents exist before touching the store.
pub struct Collection<'a, R> {
    store: &'a DocumentStore,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> Collection<'a, R> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    fn decode(stored: StoredDocument) -> StoreResult<Document<R>> {
        Ok(Document {
            id: stored.id,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            body: serde_json::from_value(stored.content)?,
        })
    }

    /// Decode a client payload against the schema.
    pub fn decode_payload(payload: Value) -> StoreResult<R> {
        serde_json::from_value(payload)
            .map_err(|err| ValidationError::Malformed(err.to_string()).into())
    }

    pub async fn find(&self, query: &Query) -> StoreResult<Vec<Document<R>>> {
        self.store
            .find(R::COLLECTION, query)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    pub async fn find_one(&self, conditions: Vec<Condition>) -> StoreResult<Option<Document<R>>> {
        let query = Query::new(R::default_sort()).filters(conditions).window(0, 1);
        Ok(self.find(&query).await?.into_iter().next())
    }

    pub async fn count(&self, conditions: &[Condition]) -> StoreResult<u64> {
        self.store.count(R::COLLECTION, conditions).await
    }

    /// List in the resource's default order, windowed when a page is requested.
    pub async fn list(
        &self,
        conditions: Vec<Condition>,
        page: Option<PageRequest>,
    ) -> StoreResult<Page<Document<R>>> {
        let query = Query::new(R::default_sort()).filters(conditions);
        match page {
            None => Ok(Page::unpaged(self.find(&query).await?)),
            Some(request) => {
                let total = self.count(&query.conditions).await?;
                let query = query.window(request.offset(), request.limit);
                Ok(Page::windowed(self.find(&query).await?, total, request))
            }
        }
    }

    pub async fn try_get(&self, id: DocumentId) -> StoreResult<Option<Document<R>>> {
        self.store
            .get(R::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn get(&self, id: DocumentId) -> StoreResult<Document<R>> {
        self.try_get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(R::COLLECTION, id))
    }

    async fn prepare(&self, body: &mut R) -> StoreResult<Value> {
        body.normalize();
        body.validate()?;
        for reference in body.references() {
            if self.store.get(reference.collection, reference.id).await?.is_none() {
                return Err(ValidationError::UnknownReference {
                    field: reference.field,
                    id: reference.id,
                }
                .into());
            }
        }
        Ok(serde_json::to_value(&*body)?)
    }

    pub async fn create(&self, mut body: R) -> StoreResult<Document<R>> {
        let content = self.prepare(&mut body).await?;
        let stored = self.store.insert(R::COLLECTION, content).await?;
        tracing::info!(collection = R::COLLECTION, id = %stored.id, "document created");
        Self::decode(stored)
    }

    /// Create from an untyped payload, e.g. a JSON body or multipart fields.
    pub async fn create_from(&self, payload: Value) -> StoreResult<Document<R>> {
        self.create(Self::decode_payload(payload)?).await
    }

    /// Replace the whole body of an existing document.
    pub async fn replace(&self, id: DocumentId, mut body: R) -> StoreResult<Document<R>> {
        let content = self.prepare(&mut body).await?;
        let stored = self
            .store
            .replace(R::COLLECTION, id, content)
            .await?
            .ok_or_else(|| StoreError::not_found(R::COLLECTION, id))?;
        tracing::info!(collection = R::COLLECTION, id = %id, "document updated");
        Self::decode(stored)
    }

    /// Overwrite the listed top-level fields and re-validate the result.
    /// Nested objects are replaced whole.
    pub async fn update(&self, id: DocumentId, patch: Map<String, Value>) -> StoreResult<Document<R>> {
        let current = self
            .store
            .get(R::COLLECTION, id)
            .await?
            .ok_or_else(|| StoreError::not_found(R::COLLECTION, id))?;

        let mut fields = match current.content {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        fields.extend(patch);

        let body = Self::decode_payload(Value::Object(fields))?;
        self.replace(id, body).await
    }

    pub async fn delete(&self, id: DocumentId) -> StoreResult<Document<R>> {
        let stored = self
            .store
            .delete(R::COLLECTION, id)
            .await?
            .ok_or_else(|| StoreError::not_found(R::COLLECTION, id))?;
        tracing::info!(collection = R::COLLECTION, id = %id, "document deleted");
        Self::decode(stored)
    }

    /// Merge `fields` into the first document whose `path` equals `value`,
    /// or create one from them. Fields not listed keep their stored values.
    pub async fn upsert_by(
        &self,
        path: &str,
        value: Value,
        fields: Map<String, Value>,
    ) -> StoreResult<Upserted<R>> {
        match self.find_one(vec![Condition::eq(path, value)]).await? {
            Some(existing) => self.update(existing.id, fields).await.map(Upserted::Updated),
            None => self
                .create_from(Value::Object(fields))
                .await
                .map(Upserted::Inserted),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Upserted<R> {
    Inserted(Document<R>),
    Updated(Document<R>),
}

impl<R> Upserted<R> {
    pub fn document(&self) -> &Document<R> {
        match self {
            Upserted::Inserted(doc) | Upserted::Updated(doc) => doc,
        }
    }
}
