use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::id::{self, DocumentId};
use crate::document::validate::{require, Reference, Resource, ValidationError};
use crate::fields;
use crate::store::{Condition, Sort};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    #[serde(deserialize_with = "fields::date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Resource for Event {
    const COLLECTION: &'static str = "events";

    fn default_sort() -> Sort {
        Sort::desc("date")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }
}

/// Uploaded picture, either free-standing or part of an event's gallery.
/// Deleting an event does not delete its images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub file_url: String,
    #[serde(default, deserialize_with = "id::optional")]
    pub event_id: Option<DocumentId>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl GalleryImage {
    /// Filter selecting one event's gallery.
    pub fn of_event(event_id: DocumentId) -> Condition {
        Condition::eq("eventId", event_id.to_string())
    }
}

impl Resource for GalleryImage {
    const COLLECTION: &'static str = "gallery_images";

    fn validate(&self) -> Result<(), ValidationError> {
        require("fileUrl", &self.file_url)
    }

    fn references(&self) -> Vec<Reference> {
        self.event_id
            .map(|id| Reference::to::<Event>("eventId", id))
            .into_iter()
            .collect()
    }
}
