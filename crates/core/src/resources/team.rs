use serde::{Deserialize, Serialize};

use crate::document::validate::{require, Resource, ValidationError};
use crate::store::Sort;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    /// Position on the team page, smallest first.
    #[serde(default)]
    pub order: i32,
}

impl Resource for TeamMember {
    const COLLECTION: &'static str = "team_members";

    fn default_sort() -> Sort {
        Sort::asc("order")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}
