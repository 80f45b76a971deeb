use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::validate::{require, Resource, ValidationError};
use crate::fields;
use crate::store::{Condition, DocumentStore, StoreResult};

/// Contact form submission. Append-only: no update or delete path exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    /// Consent to marketing messages. Wire name predates the camelCase convention.
    #[serde(rename = "AllowMsg", default, deserialize_with = "fields::flag")]
    pub allow_msg: bool,
}

impl Resource for Inquiry {
    const COLLECTION: &'static str = "inquiries";

    fn validate(&self) -> Result<(), ValidationError> {
        require("fullName", &self.full_name)?;
        require("email", &self.email)?;
        require("message", &self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryStats {
    pub total: u64,
    pub today: u64,
}

/// Totals, with `today` counted from midnight UTC of `now`.
pub async fn stats(store: &DocumentStore, now: DateTime<Utc>) -> StoreResult<InquiryStats> {
    let inquiries = store.collection::<Inquiry>();
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now);
    Ok(InquiryStats {
        total: inquiries.count(&[]).await?,
        today: inquiries.count(&[Condition::CreatedSince(midnight)]).await?,
    })
}
