//! Seed data for the sales-expert roster.
//!
//! Each expert is attached to the office whose city matches a pattern
//! (case-insensitive), and upserted by phone number so re-running the seed
//! updates rather than duplicates.

use serde_json::{json, Map, Value};

use crate::document::id::DocumentId;
use crate::resources::{OfficeLocation, SalesExpert};
use crate::store::collection::Upserted;
use crate::store::{Condition, DocumentStore, StoreResult};

/// One roster entry: the expert plus the pattern locating their office.
#[derive(Debug, Clone)]
pub struct ExpertSeed {
    pub name: &'static str,
    pub designation: &'static str,
    pub region: &'static str,
    pub phone: &'static str,
    pub city_pattern: &'static str,
}

/// Regional heads seeded into a fresh installation.
pub const DEFAULT_ROSTER: &[ExpertSeed] = &[
    ExpertSeed {
        name: "North Region Sales Lead",
        designation: "General Manager - Sales",
        region: "North",
        phone: "+91-90000-00001",
        city_pattern: "Delhi",
    },
    ExpertSeed {
        name: "South Region Sales Lead",
        designation: "Senior Manager - Sales",
        region: "South",
        phone: "+91-90000-00002",
        city_pattern: "Bangalore|Bengaluru",
    },
    ExpertSeed {
        name: "West Region Sales Lead",
        designation: "General Manager - Sales",
        region: "West",
        phone: "+91-90000-00003",
        city_pattern: "Mumbai",
    },
    ExpertSeed {
        name: "East Region Sales Lead",
        designation: "Deputy General Manager - Sales",
        region: "East",
        phone: "+91-90000-00004",
        city_pattern: "Kolkata",
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub updated: usize,
    /// Experts left without an office because no city matched.
    pub unassigned: usize,
}

/// First office whose city matches `pattern`, ignoring case.
pub async fn find_office_by_city(store: &DocumentStore, pattern: &str) -> StoreResult<Option<DocumentId>> {
    let office = store
        .collection::<OfficeLocation>()
        .find_one(vec![Condition::matches("address.city", pattern)])
        .await?;
    Ok(office.map(|doc| doc.id))
}

pub async fn seed_sales_experts(store: &DocumentStore, roster: &[ExpertSeed]) -> StoreResult<SeedReport> {
    let experts = store.collection::<SalesExpert>();
    let mut report = SeedReport::default();

    for entry in roster {
        let office_location_id = find_office_by_city(store, entry.city_pattern).await?;
        if office_location_id.is_none() {
            tracing::warn!(
                city = entry.city_pattern,
                expert = entry.name,
                "no office location matches; expert will have no office assigned"
            );
            report.unassigned += 1;
        }

        // `isActive` is left out so an administrator's choice survives a reseed.
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!(entry.name));
        fields.insert("designation".to_string(), json!(entry.designation));
        fields.insert("region".to_string(), json!(entry.region));
        fields.insert("phone".to_string(), json!(entry.phone));
        fields.insert("officeLocationId".to_string(), json!(office_location_id));
        match experts
            .upsert_by("phone", Value::from(entry.phone), fields)
            .await?
        {
            Upserted::Inserted(_) => report.inserted += 1,
            Upserted::Updated(_) => report.updated += 1,
        }
    }

    tracing::info!(
        inserted = report.inserted,
        updated = report.updated,
        unassigned = report.unassigned,
        "sales experts seeded"
    );
    Ok(report)
}
