use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use student_publications::{
    config::AppConfig, db, ranking::RankingService, routes::build_router,
    store::PgInteractionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "student_publications=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let pool = db::init_db(&config.database_url, config.max_connections.get()).await?;
    tracing::info!("Database initialized");

    let store = PgInteractionStore::new(pool);
    let service = RankingService::new(Arc::new(store)).with_query_timeout(config.query_timeout);
    let app = build_router(service);

    tracing::info!("Server running on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
