//! Multipart form reading and on-disk storage for uploaded files.
//!
//! Files land in `<upload_dir>/<folder>/<uuid>.<ext>` and are served back by
//! the static `/uploads` route.

use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use serde_json::{Map, Value};
use uuid::Uuid;

use portal_cms_core::store::StoreResult;

use crate::error::{ApiError, ApiResult};

/// URL prefix uploaded files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// A file part of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Extension of the client's file name, restricted to alphanumerics.
    fn extension(&self) -> Option<String> {
        self.file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_ascii_lowercase)
    }
}

/// A multipart body split into text fields and files.
#[derive(Debug, Default)]
pub struct FormPayload {
    pub fields: Map<String, Value>,
    pub files: Vec<UploadedFile>,
}

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Self::read(multipart).await
    }
}

impl FormPayload {
    /// Drain the request. Parts with a file name are files, the rest are text.
    pub async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut payload = FormPayload::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if bytes.is_empty() {
                        continue;
                    }
                    payload.files.push(UploadedFile {
                        field: name,
                        file_name: Some(file_name),
                        bytes,
                    });
                }
                None => {
                    let text = field.text().await?;
                    payload.fields.insert(name, Value::String(text));
                }
            }
        }
        Ok(payload)
    }

    /// Remove and return the first file sent under `field`.
    pub fn take_file(&mut self, field: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|file| file.field == field)?;
        Some(self.files.remove(index))
    }

    /// Remove and return every file sent under `field`.
    pub fn take_files(&mut self, field: &str) -> Vec<UploadedFile> {
        let (taken, rest) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|file| file.field == field);
        self.files = rest;
        taken
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a file into `folder` and return its public URL.
    pub async fn save(&self, folder: &str, file: &UploadedFile) -> ApiResult<String> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let name = match file.extension() {
            Some(ext) => format!("{}.{ext}", Uuid::now_v7()),
            None => Uuid::now_v7().to_string(),
        };
        tokio::fs::write(dir.join(&name), &file.bytes).await?;
        tracing::debug!(folder, file = %name, bytes = file.bytes.len(), "upload stored");
        Ok(format!("{PUBLIC_PREFIX}/{folder}/{name}"))
    }

    /// Map a public URL back onto the upload directory. URLs outside the
    /// prefix or escaping the root yield `None`.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(PUBLIC_PREFIX)?.trim_start_matches('/');
        let relative = Path::new(relative);
        if relative.as_os_str().is_empty()
            || relative
                .components()
                .any(|part| !matches!(part, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }

    /// Delete a previously stored file. Failures are logged, not returned.
    pub async fn remove(&self, url: &str) {
        let Some(path) = self.resolve(url) else {
            return;
        };
        if let Err(err) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), "failed to remove upload: {err}");
        }
    }

    /// Store the file sent under `field`, if any, and record its URL in the
    /// form under `url_field`. Returns the URL so a failed write can discard it.
    pub async fn attach(
        &self,
        form: &mut FormPayload,
        field: &str,
        folder: &str,
        url_field: &str,
    ) -> ApiResult<Option<String>> {
        let Some(file) = form.take_file(field) else {
            return Ok(None);
        };
        let url = self.save(folder, &file).await?;
        form.fields
            .insert(url_field.to_string(), Value::String(url.clone()));
        Ok(Some(url))
    }

    /// Pass a write result through, removing the freshly stored file when the
    /// write failed.
    pub async fn settle<T>(&self, result: StoreResult<T>, stored: Option<String>) -> ApiResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                if let Some(url) = stored {
                    self.remove(&url).await;
                }
                Err(err.into())
            }
        }
    }

    /// Remove the file a document used to point at, if it changed.
    pub async fn remove_replaced(&self, previous: Option<&str>, current: Option<&str>) {
        if let Some(previous) = previous {
            if Some(previous) != current {
                self.remove(previous).await;
            }
        }
    }
}
