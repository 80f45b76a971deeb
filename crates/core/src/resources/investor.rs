//! Investor relations: report categories, uploaded reports and dashboard counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::office::{OfficeLocation, OfficeType};
use crate::document::id::DocumentId;
use crate::document::model::Document;
use crate::document::validate::{require, Reference, Resource, ValidationError};
use crate::fields;
use crate::store::join::{join, join_page};
use crate::store::{Condition, DocumentStore, Page, PageRequest, Query, Sort, StoreError, StoreResult};

/// Reports shown in the dashboard's recent list.
pub const RECENT_REPORTS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorCategory {
    pub name: String,
    /// URL key. Derived from the name when left blank.
    #[serde(default)]
    pub slug: String,
}

impl Resource for InvestorCategory {
    const COLLECTION: &'static str = "investor_categories";

    fn default_sort() -> Sort {
        Sort::asc("name")
    }

    fn normalize(&mut self) {
        let source = if self.slug.trim().is_empty() {
            &self.name
        } else {
            &self.slug
        };
        self.slug = fields::slugify(source);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("slug", &self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorReport {
    pub title: String,
    pub category_id: DocumentId,
    #[serde(default = "fields::now", deserialize_with = "fields::date")]
    pub uploaded_date: DateTime<Utc>,
    pub file_url: String,
    /// Hidden reports are listed to administrators only.
    #[serde(default = "fields::default_true", deserialize_with = "fields::flag")]
    pub is_visible: bool,
}

impl Resource for InvestorReport {
    const COLLECTION: &'static str = "investor_reports";

    fn default_sort() -> Sort {
        Sort::desc("uploadedDate")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("fileUrl", &self.file_url)
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::to::<InvestorCategory>("categoryId", self.category_id)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportWithCategory {
    #[serde(flatten)]
    pub report: Document<InvestorReport>,
    pub category: Option<Document<InvestorCategory>>,
}

impl ReportWithCategory {
    fn new(report: Document<InvestorReport>, category: Option<Document<InvestorCategory>>) -> Self {
        Self { report, category }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorCounts {
    pub reports: u64,
    pub categories: u64,
    pub office_types: u64,
    pub locations: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorStats {
    pub counts: InvestorCounts,
    pub recent_reports: Vec<ReportWithCategory>,
}

/// One category with its reports, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReports {
    pub category: Document<InvestorCategory>,
    pub reports: Vec<Document<InvestorReport>>,
}

pub async fn stats(store: &DocumentStore) -> StoreResult<InvestorStats> {
    let counts = InvestorCounts {
        reports: store.collection::<InvestorReport>().count(&[]).await?,
        categories: store.collection::<InvestorCategory>().count(&[]).await?,
        office_types: store.collection::<OfficeType>().count(&[]).await?,
        locations: store.collection::<OfficeLocation>().count(&[]).await?,
    };
    let recent = store
        .collection::<InvestorReport>()
        .find(&Query::new(InvestorReport::default_sort()).window(0, RECENT_REPORTS))
        .await?;
    let recent_reports = join(store, recent, category_of, ReportWithCategory::new).await?;
    Ok(InvestorStats {
        counts,
        recent_reports,
    })
}

pub async fn list_reports(
    store: &DocumentStore,
    page: Option<PageRequest>,
) -> StoreResult<Page<ReportWithCategory>> {
    let reports = store.collection::<InvestorReport>().list(Vec::new(), page).await?;
    join_page(store, reports, category_of, ReportWithCategory::new).await
}

/// Reports filed under the category with `slug`. Hidden reports are included
/// only for administrators.
pub async fn reports_by_category(
    store: &DocumentStore,
    slug: &str,
    include_hidden: bool,
) -> StoreResult<CategoryReports> {
    let category = store
        .collection::<InvestorCategory>()
        .find_one(vec![Condition::eq("slug", slug)])
        .await?
        .ok_or_else(|| StoreError::not_found(InvestorCategory::COLLECTION, slug))?;

    let mut conditions = vec![Condition::eq("categoryId", category.id.to_string())];
    if !include_hidden {
        conditions.push(Condition::eq("isVisible", true));
    }
    let reports = store
        .collection::<InvestorReport>()
        .list(conditions, None)
        .await?
        .items;
    Ok(CategoryReports { category, reports })
}

fn category_of(report: &InvestorReport) -> Option<DocumentId> {
    Some(report.category_id)
}
