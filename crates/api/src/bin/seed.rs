//! Upsert the default sales expert roster, keyed by phone number.

use portal_cms_api::config::AppConfig;
use portal_cms_core::seed::{seed_sales_experts, DEFAULT_ROSTER};
use portal_cms_core::store::PgStore;
use portal_cms_core::DocumentStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set to seed"))?;

    let pg = PgStore::connect(url, 1, 2).await?;
    pg.migrate().await?;
    let store = DocumentStore::from(pg);

    let report = seed_sales_experts(&store, DEFAULT_ROSTER).await?;
    println!(
        "Seeded sales experts: {} inserted, {} updated, {} without an office",
        report.inserted, report.updated, report.unassigned
    );
    Ok(())
}
