use portal_cms_core::resources::investor::InvestorStats;
use portal_cms_core::resources::{InquiryStats, PartnerStats, ReportWithCategory};

use crate::client::{ApiClient, ClientResult};
use crate::fetch::FetchState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: Vec<StatCard>,
    pub recent_reports: Vec<ReportWithCategory>,
}

impl DashboardView {
    pub fn new(investor: InvestorStats, contacts: InquiryStats, partners: PartnerStats) -> Self {
        let counts = investor.counts;
        let cards = vec![
            StatCard { title: "Today's Queries", count: contacts.today },
            StatCard { title: "Total Queries", count: contacts.total },
            StatCard { title: "Partner Requests", count: partners.total },
            StatCard { title: "Investor Reports", count: counts.reports },
            StatCard { title: "Categories", count: counts.categories },
            StatCard { title: "Office Types", count: counts.office_types },
            StatCard { title: "Locations", count: counts.locations },
        ];
        Self {
            cards,
            recent_reports: investor.recent_reports,
        }
    }

    pub fn card(&self, title: &str) -> Option<u64> {
        self.cards
            .iter()
            .find(|card| card.title == title)
            .map(|card| card.count)
    }
}

/// Fetch the three stat sources concurrently. Any failure fails the whole load.
pub async fn load_dashboard(client: &ApiClient) -> ClientResult<DashboardView> {
    let (investor, contacts, partners) = tokio::try_join!(
        client.investor_stats(),
        client.contact_stats(),
        client.partner_stats(),
    )?;
    Ok(DashboardView::new(investor, contacts, partners))
}

pub async fn dashboard_state(client: &ApiClient) -> FetchState<DashboardView> {
    let result = load_dashboard(client).await;
    if let Err(err) = &result {
        tracing::error!("dashboard failed to load: {err}");
    }
    result.into()
}
