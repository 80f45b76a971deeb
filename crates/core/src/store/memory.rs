use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use tokio::sync::RwLock;

use super::error::StoreResult;
use super::query::{Condition, FieldPath, Query};
use crate::document::id::DocumentId;
use crate::document::model::StoredDocument;

type Collections = HashMap<String, BTreeMap<DocumentId, StoredDocument>>;

/// Process-local document store. Backs tests and database-less development.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

/// A condition with its pattern compiled once per query.
enum Matcher<'a> {
    Eq(&'a FieldPath, &'a Value),
    Regex(&'a FieldPath, Regex),
    CreatedSince(DateTime<Utc>),
}

impl Matcher<'_> {
    fn accepts(&self, doc: &StoredDocument) -> bool {
        match self {
            Matcher::Eq(path, value) => path.lookup(&doc.content) == Some(*value),
            Matcher::Regex(path, regex) => path
                .lookup(&doc.content)
                .and_then(Value::as_str)
                .is_some_and(|text| regex.is_match(text)),
            Matcher::CreatedSince(since) => doc.created_at >= *since,
        }
    }
}

fn compile(conditions: &[Condition]) -> StoreResult<Vec<Matcher<'_>>> {
    conditions.iter().map(compile_one).collect()
}

fn compile_one(condition: &Condition) -> StoreResult<Matcher<'_>> {
    Ok(match condition {
        Condition::Eq { path, value } => Matcher::Eq(path, value),
        Condition::Matches { path, pattern } => Matcher::Regex(
            path,
            RegexBuilder::new(pattern).case_insensitive(true).build()?,
        ),
        Condition::CreatedSince(since) => Matcher::CreatedSince(*since),
    })
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, collection: &str, content: Value) -> StoreResult<StoredDocument> {
        let now = Utc::now();
        let doc = StoredDocument {
            id: DocumentId::new(),
            collection: collection.to_string(),
            content,
            created_at: now,
            updated_at: now,
        };
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(doc.id, doc.clone());
        Ok(doc)
    }

    pub async fn get(&self, collection: &str, id: DocumentId) -> StoreResult<Option<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(&id))
            .cloned())
    }

    pub async fn find(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        let matchers = compile(&query.conditions)?;
        let collections = self.collections.read().await;
        let mut docs: Vec<StoredDocument> = collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| matchers.iter().all(|m| m.accepts(doc)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(collections);

        docs.sort_by(|a, b| query.sort.compare(a, b));
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        Ok(docs.into_iter().skip(offset).take(limit).collect())
    }

    pub async fn count(&self, collection: &str, conditions: &[Condition]) -> StoreResult<u64> {
        let matchers = compile(conditions)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| matchers.iter().all(|m| m.accepts(doc)))
                    .count() as u64
            })
            .unwrap_or(0))
    }

    pub async fn replace(
        &self,
        collection: &str,
        id: DocumentId,
        content: Value,
    ) -> StoreResult<Option<StoredDocument>> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(&id))
        else {
            return Ok(None);
        };
        doc.content = content;
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    pub async fn delete(&self, collection: &str, id: DocumentId) -> StoreResult<Option<StoredDocument>> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(&id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::query::Sort;
    use serde_json::json;

    #[tokio::test]
    async fn insert_then_get() {
        let store = MemoryStore::new();
        let doc = store.insert("news", json!({ "title": "Launch" })).await.unwrap();

        let fetched = store.get("news", doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.content["title"], "Launch");
        assert!(store.get("events", doc.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_filters_by_equality_and_regex() {
        let store = MemoryStore::new();
        store
            .insert("offices", json!({ "kind": "branch", "address": { "city": "New Delhi" } }))
            .await
            .unwrap();
        store
            .insert("offices", json!({ "kind": "head", "address": { "city": "Mumbai" } }))
            .await
            .unwrap();

        let by_city = Query::new(Sort::newest_first()).filter(Condition::matches("address.city", "delhi"));
        let found = store.find("offices", &by_city).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].content["kind"], "branch");

        let by_kind = [Condition::eq("kind", "head")];
        assert_eq!(store.count("offices", &by_kind).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn invalid_pattern_is_an_error() {
        let store = MemoryStore::new();
        let query = Query::new(Sort::newest_first()).filter(Condition::matches("name", "("));
        assert!(store.find("x", &query).await.is_err());
    }

    #[tokio::test]
    async fn window_skips_and_limits() {
        let store = MemoryStore::new();
        for n in 0..5 {
            store.insert("items", json!({ "n": n })).await.unwrap();
        }
        let query = Query::new(Sort::asc("n")).window(2, 2);
        let page: Vec<i64> = store
            .find("items", &query)
            .await
            .unwrap()
            .iter()
            .map(|doc| doc.content["n"].as_i64().unwrap())
            .collect();
        assert_eq!(page, vec![2, 3]);

        let beyond = Query::new(Sort::asc("n")).window(10, 2);
        assert!(store.find("items", &beyond).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_and_delete_missing_ids_are_none() {
        let store = MemoryStore::new();
        let id = DocumentId::new();
        assert!(store.replace("items", id, json!({})).await.unwrap().is_none());
        assert!(store.delete("items", id).await.unwrap().is_none());
        assert_eq!(store.count("items", &[]).await.unwrap(), 0);
    }
}
