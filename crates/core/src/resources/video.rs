use serde::{Deserialize, Serialize};

use crate::document::validate::{require, Resource, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl Resource for Video {
    const COLLECTION: &'static str = "videos";

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("url", &self.url)
    }
}
