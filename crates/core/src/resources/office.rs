use serde::{Deserialize, Serialize};

use crate::document::id::DocumentId;
use crate::document::model::Document;
use crate::document::validate::{require, Reference, Resource, ValidationError};
use crate::store::join::join_page;
use crate::store::{Condition, DocumentStore, Page, PageRequest, Sort, StoreResult};

/// Category of office, e.g. head office or branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeType {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Resource for OfficeType {
    const COLLECTION: &'static str = "office_types";

    fn default_sort() -> Sort {
        Sort::asc("name")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("code", &self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub country: String,
    #[serde(default)]
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeLocation {
    pub office_type_id: DocumentId,
    pub office_name: String,
    pub address: Address,
    #[serde(default)]
    pub contact: ContactInfo,
}

impl Resource for OfficeLocation {
    const COLLECTION: &'static str = "office_locations";

    fn validate(&self) -> Result<(), ValidationError> {
        require("officeName", &self.office_name)?;
        require("address.line1", &self.address.line1)?;
        require("address.city", &self.address.city)?;
        require("address.country", &self.address.country)
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to::<OfficeType>("officeTypeId", self.office_type_id)]
    }
}

/// A location with its office type resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationWithType {
    #[serde(flatten)]
    pub location: Document<OfficeLocation>,
    pub office_type: Option<Document<OfficeType>>,
}

impl LocationWithType {
    fn new(location: Document<OfficeLocation>, office_type: Option<Document<OfficeType>>) -> Self {
        Self {
            location,
            office_type,
        }
    }
}

/// Locations, optionally restricted to one office type, with types joined.
/// An unknown type id simply matches nothing.
pub async fn list_locations(
    store: &DocumentStore,
    type_id: Option<&str>,
    page: Option<PageRequest>,
) -> StoreResult<Page<LocationWithType>> {
    let conditions = type_id
        .filter(|id| !id.trim().is_empty())
        .map(|id| vec![Condition::eq("officeTypeId", id.trim())])
        .unwrap_or_default();
    let locations = store.collection::<OfficeLocation>().list(conditions, page).await?;
    join_page(
        store,
        locations,
        |location: &OfficeLocation| Some(location.office_type_id),
        LocationWithType::new,
    )
    .await
}

pub async fn get_location(store: &DocumentStore, id: DocumentId) -> StoreResult<LocationWithType> {
    let location = store.collection::<OfficeLocation>().get(id).await?;
    let office_type = store
        .collection::<OfficeType>()
        .try_get(location.body.office_type_id)
        .await?;
    Ok(LocationWithType::new(location, office_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use serde_json::json;

    async fn seed_type(store: &DocumentStore, code: &str) -> Document<OfficeType> {
        store
            .collection::<OfficeType>()
            .create(OfficeType {
                name: format!("{code} office"),
                code: code.to_string(),
                description: None,
            })
            .await
            .unwrap()
    }

    fn location_payload(type_id: impl ToString, city: &str) -> serde_json::Value {
        json!({
            "officeTypeId": type_id.to_string(),
            "officeName": format!("{city} branch"),
            "address": { "line1": "1 Main Road", "city": city, "country": "India" },
            "contact": { "phone": "+91-11-0000", "email": "office@example.com" }
        })
    }

    #[tokio::test]
    async fn locations_are_listed_with_their_type() {
        let store = DocumentStore::memory();
        let head = seed_type(&store, "HO").await;
        store
            .collection::<OfficeLocation>()
            .create_from(location_payload(head.id, "Delhi"))
            .await
            .unwrap();

        let page = list_locations(&store, None, None).await.unwrap();
        assert_eq!(page.items.len(), 1);
        let office_type = page.items[0].office_type.as_ref().unwrap();
        assert_eq!(office_type.body.code, "HO");

        let json = serde_json::to_value(&page.items[0]).unwrap();
        assert_eq!(json["officeName"], "Delhi branch");
        assert_eq!(json["officeType"]["code"], "HO");
    }

    #[tokio::test]
    async fn type_filter_narrows_and_unknown_type_is_empty() {
        let store = DocumentStore::memory();
        let head = seed_type(&store, "HO").await;
        let branch = seed_type(&store, "BR").await;
        let locations = store.collection::<OfficeLocation>();
        locations.create_from(location_payload(head.id, "Delhi")).await.unwrap();
        locations.create_from(location_payload(branch.id, "Pune")).await.unwrap();

        let branch_id = branch.id.to_string();
        let filtered = list_locations(&store, Some(&branch_id), None).await.unwrap();
        assert_eq!(filtered.items.len(), 1);
        assert_eq!(filtered.items[0].location.body.address.city, "Pune");

        let unknown = list_locations(&store, Some("not-an-id"), None).await.unwrap();
        assert!(unknown.items.is_empty());
    }

    #[tokio::test]
    async fn location_with_missing_type_is_rejected() {
        let store = DocumentStore::memory();
        let err = store
            .collection::<OfficeLocation>()
            .create_from(location_payload(DocumentId::new(), "Delhi"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::UnknownReference { field: "officeTypeId", .. })
        ));
    }

    #[tokio::test]
    async fn deleting_a_type_leaves_locations_with_no_type() {
        let store = DocumentStore::memory();
        let head = seed_type(&store, "HO").await;
        let location = store
            .collection::<OfficeLocation>()
            .create_from(location_payload(head.id, "Delhi"))
            .await
            .unwrap();
        store.collection::<OfficeType>().delete(head.id).await.unwrap();

        let joined = get_location(&store, location.id).await.unwrap();
        assert!(joined.office_type.is_none());
    }
}
