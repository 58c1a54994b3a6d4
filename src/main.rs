use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;

mod auth;
mod config;
mod context;
mod db;
mod dto;
mod error;
mod extract;
mod handlers;
mod models;
mod repo;
mod routes;
mod services;

use auth::rate_limit::{spawn_cleanup_worker, RateLimitState};
use config::Config;
use repo::{EntryStore, PgEntryStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub entries: Arc<dyn EntryStore>,
    pub rate_limiter: RateLimitState,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salud_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::create_pool(&config.database_url).await?;

    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("Database migrations applied");

    let rate_limiter = RateLimitState::new();
    spawn_cleanup_worker(rate_limiter.clone());

    let state = AppState {
        entries: Arc::new(PgEntryStore::new(db.clone())),
        db,
        config: config.clone(),
        rate_limiter,
    };

    let app = routes::build_router(state)?;

    let addr = config.listen_addr();
    tracing::info!(
        taxonomy = ?config.mood_taxonomy,
        "Starting server on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    // connect info feeds the per-IP auth rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
