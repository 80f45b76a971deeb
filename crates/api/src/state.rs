use std::sync::Arc;

use portal_cms_core::DocumentStore;

use crate::config::AppConfig;
use crate::uploads::UploadStore;

/// Handler state: the document store, configuration and upload storage.
/// Cloned per request, so everything sits behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: DocumentStore,
    config: AppConfig,
    uploads: UploadStore,
}

impl AppState {
    pub fn new(store: DocumentStore, config: AppConfig) -> Self {
        let uploads = UploadStore::new(config.upload_dir.clone());
        Self {
            inner: Arc::new(InnerState {
                store,
                config,
                uploads,
            }),
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }
}
