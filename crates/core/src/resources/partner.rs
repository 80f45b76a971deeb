use serde::{Deserialize, Serialize};

use crate::document::validate::{require, Resource, ValidationError};
use crate::store::{Condition, DocumentStore, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PartnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerStatus::Pending => "pending",
            PartnerStatus::Approved => "approved",
            PartnerStatus::Rejected => "rejected",
        }
    }
}

/// Request to join the partner program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: PartnerStatus,
}

impl Resource for PartnerRequest {
    const COLLECTION: &'static str = "partner_requests";

    fn validate(&self) -> Result<(), ValidationError> {
        require("fullName", &self.full_name)?;
        require("email", &self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

pub async fn stats(store: &DocumentStore) -> StoreResult<PartnerStats> {
    let requests = store.collection::<PartnerRequest>();
    let with_status =
        |status: PartnerStatus| [Condition::eq("status", status.as_str())];
    Ok(PartnerStats {
        total: requests.count(&[]).await?,
        pending: requests.count(&with_status(PartnerStatus::Pending)).await?,
        approved: requests.count(&with_status(PartnerStatus::Approved)).await?,
        rejected: requests.count(&with_status(PartnerStatus::Rejected)).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn stats_break_down_by_status() {
        let store = DocumentStore::memory();
        let requests = store.collection::<PartnerRequest>();
        let first = requests
            .create_from(json!({ "fullName": "A", "email": "a@example.com" }))
            .await
            .unwrap();
        requests
            .create_from(json!({ "fullName": "B", "email": "b@example.com" }))
            .await
            .unwrap();
        let patch = json!({ "status": "approved" }).as_object().cloned().unwrap();
        requests.update(first.id, patch).await.unwrap();

        let stats = stats(&store).await.unwrap();
        assert_eq!(
            stats,
            PartnerStats {
                total: 2,
                pending: 1,
                approved: 1,
                rejected: 0
            }
        );
    }

    #[tokio::test]
    async fn unknown_status_is_malformed() {
        let store = DocumentStore::memory();
        let result = store
            .collection::<PartnerRequest>()
            .create_from(json!({ "fullName": "A", "email": "a@example.com", "status": "archived" }))
            .await;
        assert!(result.is_err());
    }
}
