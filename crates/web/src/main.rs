use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use storage::{DataStore, Database, MemoryStore, PgStore, RetryPolicy};
use web::{build_router, config::Config, middleware::auth::ApiKeys, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Funding Journey API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let store = open_store(&config).await?;
    tracing::info!(backend = store.backend_tag(), "Data store ready");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("No API keys configured, protected endpoints will reject every request");
    }

    let state = AppState::new(store, config.mock_mode());
    let app = build_router(state, api_keys);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn DataStore>> {
    let database_url = match &config.database_url {
        Some(url) if !config.mock_mode() => url,
        _ => {
            tracing::info!(
                delay_ms = config.mock_data_delay_ms,
                "Serving bundled mock data"
            );
            let store = MemoryStore::from_seed()
                .context("Failed to load bundled mock data")?
                .with_delay(Duration::from_millis(config.mock_data_delay_ms));
            return Ok(Arc::new(store));
        }
    };

    tracing::info!(
        "Connecting to database at: {}",
        database_url.split('@').next_back().unwrap_or("unknown")
    );
    let db = Database::new(database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let retry = RetryPolicy::new(config.max_retries, config.error_retry_delay_ms);
    Ok(Arc::new(PgStore::new(db.pool().clone(), retry)))
}
