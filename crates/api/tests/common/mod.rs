use std::net::SocketAddr;

use portal_cms_api::config::AppConfig;
use portal_cms_api::state::AppState;
use portal_cms_core::DocumentStore;
use tempfile::TempDir;

/// A server bound to an ephemeral port over the in-memory store.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub uploads: TempDir,
}

impl TestServer {
    pub async fn spawn() -> Self {
        Self::spawn_with(AppConfig::default()).await
    }

    /// Spawn with `config`; the upload directory is always a fresh temp dir.
    pub async fn spawn_with(config: AppConfig) -> Self {
        let uploads = tempfile::tempdir().expect("upload dir");
        let config = AppConfig {
            upload_dir: uploads.path().to_path_buf(),
            ..config
        };
        let app = portal_cms_api::app(AppState::new(DocumentStore::memory(), config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            uploads,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}
