mod config;
mod lifecycle;
mod webhook;

use std::net::SocketAddr;

use anyhow::Context as _;
use tracing::{info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use hearth_core::Data;
use hearth_database::{Database, MemoryPlayerStore};
use hearth_telegram::TelegramClient;

use crate::config::{Config, WEBHOOK_PATH};
use crate::webhook::WebhookState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let level = *metadata.level();

        let within_info_level = level <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        // Statement logging from sqlx is noise unless it is a slow-query warning.
        !(metadata.target().starts_with("sqlx::query") && level > tracing::Level::WARN)
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    info!(?config, "Configuration loaded.");

    let db = if config.uses_memory_store() {
        warn!("DATABASE_URL=memory: players are kept in process memory and lost on restart.");
        Database::from_memory(MemoryPlayerStore::new())
    } else {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await
            .context("failed to connect to PostgreSQL")?;
        info!("PostgreSQL connection established.");
        Database::new(db_pool)
    };
    let telegram = TelegramClient::new(&config.bot_token, &config.telegram_api_url)?;

    // Bind before registering the webhook so the first delivery finds us listening.
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let me = lifecycle::start(&config, &db, &telegram).await?;

    let data = Data {
        db,
        telegram,
        bot_username: me.username,
    };
    let app = webhook::router(WebhookState::new(
        data.clone(),
        config.webhook_secret.clone(),
    ));

    info!(%addr, path = WEBHOOK_PATH, "Hearth is listening for updates.");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(lifecycle::shutdown_signal())
        .await;

    lifecycle::stop(&data).await;
    served.context("webhook server failed")?;
    Ok(())
}
