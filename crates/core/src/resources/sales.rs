use serde::{Deserialize, Serialize};

use super::office::OfficeLocation;
use crate::document::id::{self, DocumentId};
use crate::document::model::Document;
use crate::document::validate::{require, Reference, Resource, ValidationError};
use crate::fields;
use crate::store::join::join_page;
use crate::store::{DocumentStore, Page, PageRequest, StoreResult};

/// Regional sales contact, optionally attached to an office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesExpert {
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    pub region: String,
    pub phone: String,
    #[serde(default, deserialize_with = "id::optional")]
    pub office_location_id: Option<DocumentId>,
    #[serde(default = "fields::default_true", deserialize_with = "fields::flag")]
    pub is_active: bool,
}

impl Resource for SalesExpert {
    const COLLECTION: &'static str = "sales_experts";

    fn normalize(&mut self) {
        self.phone = self.phone.trim().to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("region", &self.region)?;
        require("phone", &self.phone)
    }

    fn references(&self) -> Vec<Reference> {
        self.office_location_id
            .map(|id| Reference::to::<OfficeLocation>("officeLocationId", id))
            .into_iter()
            .collect()
    }
}

/// An expert with the office they sit in, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertWithOffice {
    #[serde(flatten)]
    pub expert: Document<SalesExpert>,
    pub office_location: Option<Document<OfficeLocation>>,
}

impl ExpertWithOffice {
    fn new(expert: Document<SalesExpert>, office_location: Option<Document<OfficeLocation>>) -> Self {
        Self {
            expert,
            office_location,
        }
    }
}

pub async fn list_experts(
    store: &DocumentStore,
    page: Option<PageRequest>,
) -> StoreResult<Page<ExpertWithOffice>> {
    let experts = store.collection::<SalesExpert>().list(Vec::new(), page).await?;
    join_page(
        store,
        experts,
        |expert: &SalesExpert| expert.office_location_id,
        ExpertWithOffice::new,
    )
    .await
}

/// Resolve the office of a single expert.
pub async fn with_office(
    store: &DocumentStore,
    expert: Document<SalesExpert>,
) -> StoreResult<ExpertWithOffice> {
    let office_location = match expert.body.office_location_id {
        Some(id) => store.collection::<OfficeLocation>().try_get(id).await?,
        None => None,
    };
    Ok(ExpertWithOffice::new(expert, office_location))
}
