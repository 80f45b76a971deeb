//! Admin console for the corporate site: API client, page controllers,
//! form transforms, dashboard and navigation.

pub mod client;
pub mod dashboard;
pub mod fetch;
pub mod forms;
pub mod navigation;
pub mod page;

pub use client::{ApiClient, ClientError, ClientResult, Endpoint, ListQuery};
pub use dashboard::{load_dashboard, DashboardView, StatCard};
pub use fetch::FetchState;
pub use page::{Confirm, ResourcePage};
