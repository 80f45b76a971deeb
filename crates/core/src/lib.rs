//! Document model, schemas and storage for the corporate site content backend.

pub mod document;
pub mod fields;
pub mod resources;
pub mod seed;
pub mod store;

pub use document::id::DocumentId;
pub use document::model::{DeleteAck, Document};
pub use document::validate::{Resource, ValidationError};
pub use store::{Collection, DocumentStore, Page, PageRequest, StoreError};
