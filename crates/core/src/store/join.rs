use std::collections::HashMap;

use super::error::StoreResult;
use super::page::Page;
use super::DocumentStore;
use crate::document::id::DocumentId;
use crate::document::model::Document;
use crate::document::validate::Resource;

/// Resolve one reference per document against another collection.
///
/// Absent or dangling references resolve to `None`; each distinct target is
/// fetched once.
pub async fn join<T, U, J>(
    store: &DocumentStore,
    docs: Vec<Document<T>>,
    key: impl Fn(&T) -> Option<DocumentId>,
    combine: impl Fn(Document<T>, Option<Document<U>>) -> J,
) -> StoreResult<Vec<J>>
where
    T: Resource,
    U: Resource + Clone,
{
    let related = store.collection::<U>();
    let mut resolved: HashMap<DocumentId, Option<Document<U>>> = HashMap::new();
    let mut joined = Vec::with_capacity(docs.len());

    for doc in docs {
        let target = match key(&doc.body) {
            None => None,
            Some(id) => {
                if !resolved.contains_key(&id) {
                    let found = related.try_get(id).await?;
                    resolved.insert(id, found);
                }
                resolved.get(&id).cloned().flatten()
            }
        };
        joined.push(combine(doc, target));
    }
    Ok(joined)
}

/// [`join`] over a listing page, keeping its window fields.
pub async fn join_page<T, U, J>(
    store: &DocumentStore,
    page: Page<Document<T>>,
    key: impl Fn(&T) -> Option<DocumentId>,
    combine: impl Fn(Document<T>, Option<Document<U>>) -> J,
) -> StoreResult<Page<J>>
where
    T: Resource,
    U: Resource + Clone,
{
    let Page {
        items,
        total,
        page,
        limit,
        total_pages,
    } = page;
    let items = join(store, items, key, combine).await?;
    Ok(Page {
        items,
        total,
        page,
        limit,
        total_pages,
    })
}
