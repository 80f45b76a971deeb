//! Edit forms and their conversion to request bodies.
//!
//! Forms hold what the operator types: delimited text for lists, bare
//! `YYYY-MM-DD` dates, flat address fields. `payload`/`into_multipart` build
//! the request body; `from_document` fills a form back from a stored record.

use chrono::{DateTime, Utc};
use portal_cms_core::fields::{split_lines, split_tags};
use portal_cms_core::resources::{
    Blog, Career, Event, InvestorReport, LocationWithType, News, OfficeLocation,
};
use portal_cms_core::Document;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    fn into_part(self) -> Part {
        Part::bytes(self.bytes).file_name(self.file_name)
    }
}

fn day(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Blank text is sent as absent.
fn optional(value: &str) -> Value {
    match value.trim() {
        "" => Value::Null,
        trimmed => Value::String(trimmed.to_string()),
    }
}

/// Always sent, so a field emptied on edit clears the stored value.
fn with_text(form: Form, name: &'static str, value: &str) -> Form {
    form.text(name, value.trim().to_string())
}

/// Left out when blank: dates and references the server fills or keeps.
fn with_optional_text(form: Form, name: &'static str, value: &str) -> Form {
    match value.trim() {
        "" => form,
        trimmed => form.text(name, trimmed.to_string()),
    }
}

fn with_file(form: Form, name: &'static str, file: Option<FileUpload>) -> Form {
    match file {
        Some(file) => form.part(name, file.into_part()),
        None => form,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogForm {
    pub title: String,
    pub content: String,
    pub featured_image: String,
    pub category: String,
    /// Comma separated.
    pub tags: String,
    pub author_name: String,
    pub published_at: String,
}

impl BlogForm {
    pub fn payload(&self) -> Value {
        let mut payload = json!({
            "title": self.title.trim(),
            "content": self.content,
            "featuredImage": optional(&self.featured_image),
            "category": optional(&self.category),
            "tags": split_tags(&self.tags),
            "author": { "name": self.author_name.trim() },
        });
        if !self.published_at.trim().is_empty() {
            payload["publishedAt"] = Value::String(self.published_at.trim().to_string());
        }
        payload
    }

    pub fn from_document(blog: &Document<Blog>) -> Self {
        let body = &blog.body;
        Self {
            title: body.title.clone(),
            content: body.content.clone(),
            featured_image: text(&body.featured_image),
            category: text(&body.category),
            tags: body.tags.join(", "),
            author_name: body.author.name.clone(),
            published_at: day(&body.published_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerForm {
    pub title: String,
    pub location: String,
    pub department: String,
    pub experience: String,
    pub job_type: String,
    pub description: String,
    /// One per line.
    pub responsibilities: String,
    /// One per line.
    pub qualifications: String,
}

impl CareerForm {
    pub fn payload(&self) -> Value {
        json!({
            "title": self.title.trim(),
            "location": optional(&self.location),
            "department": optional(&self.department),
            "experience": optional(&self.experience),
            "jobType": optional(&self.job_type),
            "description": optional(&self.description),
            "responsibilities": split_lines(&self.responsibilities),
            "qualifications": split_lines(&self.qualifications),
        })
    }

    pub fn from_document(career: &Document<Career>) -> Self {
        let body = &career.body;
        Self {
            title: body.title.clone(),
            location: text(&body.location),
            department: text(&body.department),
            experience: text(&body.experience),
            job_type: text(&body.job_type),
            description: text(&body.description),
            responsibilities: body.responsibilities.join("\n"),
            qualifications: body.qualifications.join("\n"),
        }
    }
}

/// Office location with the address and contact flattened into one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationForm {
    pub office_type_id: String,
    pub office_name: String,
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    pub phone: String,
    pub email: String,
}

impl LocationForm {
    pub fn payload(&self) -> Value {
        json!({
            "officeTypeId": self.office_type_id.trim(),
            "officeName": self.office_name.trim(),
            "address": {
                "line1": self.line1.trim(),
                "line2": optional(&self.line2),
                "city": self.city.trim(),
                "state": optional(&self.state),
                "country": self.country.trim(),
                "pincode": optional(&self.pincode),
            },
            "contact": {
                "phone": optional(&self.phone),
                "email": optional(&self.email),
            },
        })
    }

    pub fn from_document(location: &Document<OfficeLocation>) -> Self {
        let body = &location.body;
        Self {
            office_type_id: body.office_type_id.to_string(),
            office_name: body.office_name.clone(),
            line1: body.address.line1.clone(),
            line2: text(&body.address.line2),
            city: body.address.city.clone(),
            state: text(&body.address.state),
            country: body.address.country.clone(),
            pincode: text(&body.address.pincode),
            phone: text(&body.contact.phone),
            email: text(&body.contact.email),
        }
    }

    pub fn from_listing(location: &LocationWithType) -> Self {
        Self::from_document(&location.location)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsForm {
    pub title: String,
    pub date_published: String,
    pub description: String,
    pub link: String,
    pub image: Option<FileUpload>,
}

impl NewsForm {
    pub fn into_multipart(self) -> Form {
        let form = with_text(Form::new(), "title", &self.title);
        let form = with_optional_text(form, "datePublished", &self.date_published);
        let form = with_text(form, "discription", &self.description);
        let form = with_text(form, "link", &self.link);
        with_file(form, "image", self.image)
    }

    /// Edit form for an existing item. The image is only sent when replaced.
    pub fn from_document(news: &Document<News>) -> Self {
        let body = &news.body;
        Self {
            title: body.title.clone(),
            date_published: day(&body.date_published),
            description: text(&body.description),
            link: text(&body.link),
            image: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub date: String,
    pub image: Option<FileUpload>,
}

impl EventForm {
    pub fn into_multipart(self) -> Form {
        let form = with_text(Form::new(), "title", &self.title);
        let form = with_optional_text(form, "date", &self.date);
        with_file(form, "image", self.image)
    }

    pub fn from_document(event: &Document<Event>) -> Self {
        Self {
            title: event.body.title.clone(),
            date: day(&event.body.date),
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportForm {
    pub title: String,
    pub category_id: String,
    pub uploaded_date: String,
    pub is_visible: bool,
    pub file: Option<FileUpload>,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            category_id: String::new(),
            uploaded_date: String::new(),
            is_visible: true,
            file: None,
        }
    }
}

impl ReportForm {
    pub fn into_multipart(self) -> Form {
        let form = with_text(Form::new(), "title", &self.title);
        let form = with_text(form, "categoryId", &self.category_id);
        let form = with_optional_text(form, "uploadedDate", &self.uploaded_date);
        let form = form.text("isVisible", self.is_visible.to_string());
        with_file(form, "file", self.file)
    }

    pub fn from_document(report: &Document<InvestorReport>) -> Self {
        let body = &report.body;
        Self {
            title: body.title.clone(),
            category_id: body.category_id.to_string(),
            uploaded_date: day(&body.uploaded_date),
            is_visible: body.is_visible,
            file: None,
        }
    }
}

/// Files for an event gallery, all sent under `images`.
pub fn gallery_upload(files: Vec<FileUpload>, caption: &str) -> Form {
    let form = with_optional_text(Form::new(), "caption", caption);
    files
        .into_iter()
        .fold(form, |form, file| form.part("images", file.into_part()))
}

/// A single gallery image, optionally attached to an event.
pub fn image_upload(file: FileUpload, event_id: Option<&str>, caption: &str) -> Form {
    let form = with_optional_text(Form::new(), "caption", caption);
    let form = with_optional_text(form, "eventId", event_id.unwrap_or_default());
    form.part("image", file.into_part())
}
