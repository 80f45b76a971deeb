//! Typed HTTP client for the content API.

use std::time::Duration;

use portal_cms_core::resources::investor::{CategoryReports, InvestorStats};
use portal_cms_core::resources::{
    Applicant, ApplicantWithCareer, Blog, Career, Event, ExpertWithOffice, GalleryImage, Inquiry,
    InquiryStats, InvestorCategory, InvestorReport, LocationWithType, News, OfficeLocation,
    OfficeType, PartnerRequest, PartnerStats, PartnerStatus, ReportWithCategory, SalesExpert,
    TeamMember, Video,
};
use portal_cms_core::{DeleteAck, Document, Page, Resource};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|status| status.as_u16()),
            ClientError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Where a resource lives on the API and what its listing returns.
///
/// Not every collection accepts every verb; the server answers 404 or 405
/// for the ones it does not route.
pub trait Endpoint: Resource {
    const PATH: &'static str;
    const LIST_PATH: &'static str = Self::PATH;
    /// Listing item, the bare document unless the server joins a reference.
    type Listed: DeserializeOwned + Send + 'static;
}

macro_rules! endpoint {
    ($resource:ty, $path:literal) => {
        endpoint!($resource, $path, Document<$resource>);
    };
    ($resource:ty, $path:literal, $listed:ty) => {
        impl Endpoint for $resource {
            const PATH: &'static str = $path;
            type Listed = $listed;
        }
    };
    ($resource:ty, $path:literal, $listed:ty, list = $list:literal) => {
        impl Endpoint for $resource {
            const PATH: &'static str = $path;
            const LIST_PATH: &'static str = $list;
            type Listed = $listed;
        }
    };
}

endpoint!(Blog, "/api/blogs");
endpoint!(Career, "/api/careers");
endpoint!(TeamMember, "/api/team-members");
endpoint!(Video, "/api/videos");
endpoint!(News, "/api/news");
endpoint!(Event, "/api/events");
endpoint!(GalleryImage, "/api/gallery");
endpoint!(Inquiry, "/api/contact");
endpoint!(PartnerRequest, "/api/partner");
endpoint!(OfficeType, "/api/office/types");
endpoint!(InvestorCategory, "/api/investor/categories");
endpoint!(
    InvestorReport,
    "/api/investor/report",
    ReportWithCategory,
    list = "/api/investor/reports"
);
endpoint!(OfficeLocation, "/api/office/locations", LocationWithType);
endpoint!(Applicant, "/api/applicants", ApplicantWithCareer);
endpoint!(SalesExpert, "/api/sales-experts", ExpertWithOffice);

/// Listing parameters. Empty values are left off the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl ListQuery {
    pub fn page(page: u64) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for `API_BASE_URL`, or the local development server.
    pub fn from_env() -> Self {
        let base_url = std::env::var("API_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            tracing::warn!(%url, status = status.as_u16(), "API request failed: {message}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        tracing::debug!(%url, status = status.as_u16(), "API request succeeded");
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    // --- Generic collection access ---

    pub async fn list<R: Endpoint>(&self, query: &ListQuery) -> ClientResult<Page<R::Listed>> {
        self.send(self.request(Method::GET, R::LIST_PATH).query(query))
            .await
    }

    pub async fn fetch<R: Endpoint>(&self, id: &str) -> ClientResult<Document<R>> {
        self.get(&format!("{}/{id}", R::PATH)).await
    }

    pub async fn create<R: Endpoint>(&self, payload: &impl Serialize) -> ClientResult<Document<R>> {
        self.send(self.request(Method::POST, R::PATH).json(payload)).await
    }

    pub async fn update<R: Endpoint>(
        &self,
        id: &str,
        patch: &impl Serialize,
    ) -> ClientResult<Document<R>> {
        let path = format!("{}/{id}", R::PATH);
        self.send(self.request(Method::PUT, &path).json(patch)).await
    }

    pub async fn delete<R: Endpoint>(&self, id: &str) -> ClientResult<DeleteAck> {
        let path = format!("{}/{id}", R::PATH);
        self.send(self.request(Method::DELETE, &path)).await
    }

    async fn create_multipart<R: Endpoint>(&self, form: Form) -> ClientResult<Document<R>> {
        self.send(self.request(Method::POST, R::PATH).multipart(form)).await
    }

    async fn update_multipart<R: Endpoint>(&self, id: &str, form: Form) -> ClientResult<Document<R>> {
        let path = format!("{}/{id}", R::PATH);
        self.send(self.request(Method::PUT, &path).multipart(form)).await
    }

    // --- Investor relations ---

    pub async fn investor_stats(&self) -> ClientResult<InvestorStats> {
        self.get("/api/investor/stats").await
    }

    pub async fn categories(&self) -> ClientResult<Page<Document<InvestorCategory>>> {
        self.list::<InvestorCategory>(&ListQuery::default()).await
    }

    pub async fn reports(&self, query: &ListQuery) -> ClientResult<Page<ReportWithCategory>> {
        self.list::<InvestorReport>(query).await
    }

    pub async fn reports_by_category(&self, slug: &str, is_admin: bool) -> ClientResult<CategoryReports> {
        let request = self
            .request(Method::GET, &format!("/api/investor/category/{slug}"))
            .query(&[("isAdmin", is_admin)]);
        self.send(request).await
    }

    pub async fn create_report(&self, form: Form) -> ClientResult<Document<InvestorReport>> {
        self.create_multipart::<InvestorReport>(form).await
    }

    pub async fn update_report(&self, id: &str, form: Form) -> ClientResult<Document<InvestorReport>> {
        self.update_multipart::<InvestorReport>(id, form).await
    }

    // --- Offices ---

    pub async fn office_types(&self) -> ClientResult<Page<Document<OfficeType>>> {
        self.list::<OfficeType>(&ListQuery::default()).await
    }

    pub async fn locations(&self, type_id: Option<&str>) -> ClientResult<Page<LocationWithType>> {
        let query = ListQuery {
            type_id: type_id.filter(|id| !id.is_empty()).map(str::to_string),
            ..ListQuery::default()
        };
        self.list::<OfficeLocation>(&query).await
    }

    pub async fn create_location(&self, payload: &impl Serialize) -> ClientResult<LocationWithType> {
        self.send(self.request(Method::POST, OfficeLocation::PATH).json(payload))
            .await
    }

    pub async fn update_location(&self, id: &str, patch: &impl Serialize) -> ClientResult<LocationWithType> {
        let path = format!("{}/{id}", OfficeLocation::PATH);
        self.send(self.request(Method::PUT, &path).json(patch)).await
    }

    // --- Inquiries and partners ---

    pub async fn inquiries(&self) -> ClientResult<Page<Document<Inquiry>>> {
        self.list::<Inquiry>(&ListQuery::default()).await
    }

    pub async fn contact_stats(&self) -> ClientResult<InquiryStats> {
        self.get("/api/contact/stats").await
    }

    pub async fn partner_requests(&self) -> ClientResult<Page<Document<PartnerRequest>>> {
        self.list::<PartnerRequest>(&ListQuery::default()).await
    }

    pub async fn partner_stats(&self) -> ClientResult<PartnerStats> {
        self.get("/api/partner/stats").await
    }

    pub async fn set_partner_status(
        &self,
        id: &str,
        status: PartnerStatus,
    ) -> ClientResult<Document<PartnerRequest>> {
        let path = format!("{}/{id}/status", PartnerRequest::PATH);
        let request = self
            .request(Method::PATCH, &path)
            .json(&json!({ "status": status }));
        self.send(request).await
    }

    // --- Media ---

    pub async fn images(&self, event_id: Option<&str>) -> ClientResult<Page<Document<GalleryImage>>> {
        let query = ListQuery {
            event_id: event_id.map(str::to_string),
            ..ListQuery::default()
        };
        self.list::<GalleryImage>(&query).await
    }

    pub async fn upload_image(&self, form: Form) -> ClientResult<Document<GalleryImage>> {
        self.create_multipart::<GalleryImage>(form).await
    }

    pub async fn create_news(&self, form: Form) -> ClientResult<Document<News>> {
        self.create_multipart::<News>(form).await
    }

    pub async fn update_news(&self, id: &str, form: Form) -> ClientResult<Document<News>> {
        self.update_multipart::<News>(id, form).await
    }

    pub async fn create_event(&self, form: Form) -> ClientResult<Document<Event>> {
        self.create_multipart::<Event>(form).await
    }

    pub async fn update_event(&self, id: &str, form: Form) -> ClientResult<Document<Event>> {
        self.update_multipart::<Event>(id, form).await
    }

    pub async fn event_images(&self, event_id: &str) -> ClientResult<Page<Document<GalleryImage>>> {
        self.get(&format!("{}/{event_id}/images", Event::PATH)).await
    }

    pub async fn upload_event_images(
        &self,
        event_id: &str,
        form: Form,
    ) -> ClientResult<Vec<Document<GalleryImage>>> {
        let path = format!("{}/{event_id}/images", Event::PATH);
        self.send(self.request(Method::POST, &path).multipart(form)).await
    }

    // --- People ---

    pub async fn applicants(&self, career_id: Option<&str>) -> ClientResult<Page<ApplicantWithCareer>> {
        let query = ListQuery {
            career_id: career_id.map(str::to_string),
            ..ListQuery::default()
        };
        self.list::<Applicant>(&query).await
    }

    pub async fn sales_experts(&self) -> ClientResult<Page<ExpertWithOffice>> {
        self.list::<SalesExpert>(&ListQuery::default()).await
    }
}
