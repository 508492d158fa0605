//! Server binary: reads settings from the environment, reflects the game tables, and serves
//! record, overview, and operational routes.

use gameserver_api::{
    app, load_from_pool, AppState, GameDataRepository, HttpStatusFetcher, OverviewService, PgRecordStore, Settings,
    Table,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gameserver_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .connect(&settings.database_url)
        .await?;
    let model = load_from_pool(&pool, &settings.database_schema, &Table::names()).await?;
    let repository = GameDataRepository::new(Arc::new(PgRecordStore::new(pool, model)));

    let fetcher = HttpStatusFetcher::new(settings.server_timeout);
    match settings.server_base_url.as_deref() {
        Some(url) => tracing::info!(base_url = %url, timeout = ?settings.server_timeout, "server overview configured"),
        None => tracing::warn!("SERVER_BASE_URL not set; /server/overview requires ?base_url="),
    }
    let overview = OverviewService::new(Arc::new(fetcher), settings.server_base_url.clone());

    let state = AppState::new(repository, overview);
    let listener = TcpListener::bind(settings.bind()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
