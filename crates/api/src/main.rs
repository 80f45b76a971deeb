use portal_cms_api::config::AppConfig;
use portal_cms_api::state::AppState;
use portal_cms_core::store::PgStore;
use portal_cms_core::DocumentStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("Starting portal CMS API server");

    let store = match &config.database_url {
        Some(url) => {
            let pg = PgStore::connect(url, config.db_min_connections, config.db_max_connections)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to database: {e}"))?;
            tracing::info!("Connected to PostgreSQL");

            pg.migrate()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;
            tracing::info!("Database migrations applied");
            DocumentStore::from(pg)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; content is kept in memory and lost on exit");
            DocumentStore::memory()
        }
    };

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let addr = config.addr();
    let app = portal_cms_api::app(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
