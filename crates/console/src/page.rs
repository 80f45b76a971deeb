//! List-page controller shared by every console screen.

use std::future::Future;

use portal_cms_core::{DeleteAck, Document, Page};
use serde::Serialize;

use crate::client::{ApiClient, ClientResult, Endpoint, ListQuery};
use crate::fetch::FetchState;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this item?";

/// Asks the operator to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// One resource's list screen: the fetched page plus mutation bookkeeping.
///
/// Every successful mutation re-fetches the list; nothing is patched in place.
pub struct ResourcePage<R: Endpoint> {
    client: ApiClient,
    query: ListQuery,
    state: FetchState<Page<R::Listed>>,
    saving: bool,
    last_error: Option<String>,
}

impl<R: Endpoint> ResourcePage<R> {
    pub fn new(client: ApiClient) -> Self {
        Self::with_query(client, ListQuery::default())
    }

    pub fn with_query(client: ApiClient, query: ListQuery) -> Self {
        Self {
            client,
            query,
            state: FetchState::Loading,
            saving: false,
            last_error: None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> &FetchState<Page<R::Listed>> {
        &self.state
    }

    pub fn items(&self) -> &[R::Listed] {
        self.state.data().map(|page| page.items.as_slice()).unwrap_or_default()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Message of the last failed mutation, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_query(&mut self, query: ListQuery) {
        self.query = query;
    }

    pub async fn load(&mut self) {
        self.state = FetchState::Loading;
        self.state = self.client.list::<R>(&self.query).await.into();
    }

    /// Run a mutation with `saving` set, then reload on success.
    pub async fn mutate<T, F>(&mut self, operation: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        self.saving = true;
        let result = operation.await;
        self.saving = false;

        match result {
            Ok(value) => {
                self.last_error = None;
                self.load().await;
                Ok(value)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn create(&mut self, payload: &impl Serialize) -> ClientResult<Document<R>> {
        let client = self.client.clone();
        self.mutate(client.create::<R>(payload)).await
    }

    pub async fn update(&mut self, id: &str, patch: &impl Serialize) -> ClientResult<Document<R>> {
        let client = self.client.clone();
        self.mutate(client.update::<R>(id, patch)).await
    }

    /// Delete after confirmation. `Ok(None)` when the operator declined;
    /// no request is sent in that case.
    pub async fn delete(&mut self, id: &str, confirm: &impl Confirm) -> ClientResult<Option<DeleteAck>> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(None);
        }
        let client = self.client.clone();
        self.mutate(client.delete::<R>(id)).await.map(Some)
    }
}
