use serde::{Deserialize, Serialize};

use crate::document::id::{self, DocumentId};
use crate::document::model::Document;
use crate::document::validate::{require, Reference, Resource, ValidationError};
use crate::fields;
use crate::store::join::join_page;
use crate::store::{Condition, DocumentStore, Page, PageRequest, StoreResult};

/// Job opening. List fields are entered one item per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "fields::line_list")]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "fields::line_list")]
    pub qualifications: Vec<String>,
}

impl Resource for Career {
    const COLLECTION: &'static str = "careers";

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }
}

/// Application submitted against an opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "id::optional")]
    pub career_id: Option<DocumentId>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

impl Resource for Applicant {
    const COLLECTION: &'static str = "applicants";

    fn validate(&self) -> Result<(), ValidationError> {
        require("fullName", &self.full_name)?;
        require("email", &self.email)
    }

    fn references(&self) -> Vec<Reference> {
        self.career_id
            .map(|id| Reference::to::<Career>("careerId", id))
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantWithCareer {
    #[serde(flatten)]
    pub applicant: Document<Applicant>,
    pub career: Option<Document<Career>>,
}

impl ApplicantWithCareer {
    fn new(applicant: Document<Applicant>, career: Option<Document<Career>>) -> Self {
        Self { applicant, career }
    }
}

pub async fn list_applicants(
    store: &DocumentStore,
    career_id: Option<&str>,
    page: Option<PageRequest>,
) -> StoreResult<Page<ApplicantWithCareer>> {
    let conditions = career_id
        .filter(|id| !id.trim().is_empty())
        .map(|id| vec![Condition::eq("careerId", id.trim())])
        .unwrap_or_default();
    let applicants = store.collection::<Applicant>().list(conditions, page).await?;
    join_page(
        store,
        applicants,
        |applicant: &Applicant| applicant.career_id,
        ApplicantWithCareer::new,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn responsibilities_text_becomes_a_list() {
        let store = DocumentStore::memory();
        let careers = store.collection::<Career>();
        careers
            .create_from(json!({
                "title": "Treasury Analyst",
                "responsibilities": "Task 1\nTask 2",
                "qualifications": ["MBA", " "]
            }))
            .await
            .unwrap();

        let listed = careers.list(vec![], None).await.unwrap();
        assert_eq!(listed.items[0].body.responsibilities, vec!["Task 1", "Task 2"]);
        assert_eq!(listed.items[0].body.qualifications, vec!["MBA"]);
    }

    #[tokio::test]
    async fn applicants_filter_by_career_and_join_it() {
        let store = DocumentStore::memory();
        let career = store
            .collection::<Career>()
            .create_from(json!({ "title": "Dealer" }))
            .await
            .unwrap();
        let applicants = store.collection::<Applicant>();
        applicants
            .create_from(json!({
                "fullName": "R. Iyer",
                "email": "r@example.com",
                "careerId": career.id.to_string()
            }))
            .await
            .unwrap();
        applicants
            .create_from(json!({ "fullName": "Walk-in", "email": "w@example.com" }))
            .await
            .unwrap();

        let career_id = career.id.to_string();
        let page = list_applicants(&store, Some(&career_id), None).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].career.as_ref().unwrap().body.title, "Dealer");

        let all = list_applicants(&store, None, None).await.unwrap();
        assert_eq!(all.total, 2);
    }
}
