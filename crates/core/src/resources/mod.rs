//! Resource schemas: one module per manageable entity family.

pub mod blog;
pub mod career;
pub mod event;
pub mod inquiry;
pub mod investor;
pub mod news;
pub mod office;
pub mod partner;
pub mod sales;
pub mod team;
pub mod video;

pub use blog::{Author, Blog};
pub use career::{Applicant, ApplicantWithCareer, Career};
pub use event::{Event, GalleryImage};
pub use inquiry::{Inquiry, InquiryStats};
pub use investor::{
    CategoryReports, InvestorCategory, InvestorCounts, InvestorReport, InvestorStats,
    ReportWithCategory,
};
pub use news::News;
pub use office::{Address, ContactInfo, LocationWithType, OfficeLocation, OfficeType};
pub use partner::{PartnerRequest, PartnerStats, PartnerStatus};
pub use sales::{ExpertWithOffice, SalesExpert};
pub use team::TeamMember;
pub use video::Video;
