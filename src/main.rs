use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trackr_api::config::{AppConfig, StorageBackend};
use trackr_api::database::{
    DatabaseManager, Fixture, MemoryRepository, PgRoutineActivityRepository,
    RoutineActivityRepository,
};
use trackr_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackr_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = trackr_api::config::config().clone();
    tracing::info!("Starting trackr API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; every protected route will answer 401");
    }

    let repo = build_repository(&config).await?;
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(repo, config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("trackr API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn build_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn RoutineActivityRepository>> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            DatabaseManager::health_check(&pool)
                .await
                .context("database health check failed")?;
            Ok(Arc::new(PgRoutineActivityRepository::new(pool)))
        }
        StorageBackend::Memory => {
            let fixture = match &config.storage.memory_fixture {
                Some(path) => Fixture::load(path)
                    .with_context(|| format!("failed to load fixture {}", path.display()))?,
                None => Fixture::default(),
            };
            tracing::info!(
                "Using in-memory storage ({} routines, {} activities, {} routine activities)",
                fixture.routines.len(),
                fixture.activities.len(),
                fixture.routine_activities.len()
            );
            let repo = MemoryRepository::from_fixture(fixture)
                .context("failed to seed memory storage")?;
            Ok(Arc::new(repo))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
