use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::validate::{require, Resource, ValidationError};
use crate::fields;
use crate::store::Sort;

/// Press item. The image is optional and a new upload replaces the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub title: String,
    #[serde(deserialize_with = "fields::date")]
    pub date_published: DateTime<Utc>,
    /// Summary text; stored under the field name existing content uses.
    #[serde(rename = "discription", default, deserialize_with = "fields::optional_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "fields::optional_text")]
    pub link: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Resource for News {
    const COLLECTION: &'static str = "news";

    fn default_sort() -> Sort {
        Sort::desc("datePublished")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }
}
