use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::validate::{require, Resource, ValidationError};
use crate::fields;
use crate::store::Sort;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "fields::comma_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Author,
    #[serde(default = "fields::now", deserialize_with = "fields::date")]
    pub published_at: DateTime<Utc>,
}

impl Resource for Blog {
    const COLLECTION: &'static str = "blogs";
    const PAGE_LIMIT: Option<u64> = Some(10);

    fn default_sort() -> Sort {
        Sort::desc("publishedAt")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("content", &self.content)
    }
}
