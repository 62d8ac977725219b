use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Level, info};

use conference_server::config::AppConfig;
use conference_server::database::init_db;
use conference_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load config")?;
    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    info!(
        atomic_writes = config.webhook.atomic_writes,
        call_timeout_ms = config.database.call_timeout_ms,
        "Database ready"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { db, config };
    let app = conference_server::build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
