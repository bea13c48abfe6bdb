use anyhow::Context as _;
use hearth_core::Data;
use hearth_database::Database;
use hearth_database::impls::players::count_players;
use hearth_telegram::{BotUser, TelegramClient, WebhookOptions};
use tracing::{error, info, warn};

use crate::config::Config;

/// Ensure the schema, confirm the bot identity and point Telegram at our webhook.
pub async fn start(
    config: &Config,
    db: &Database,
    telegram: &TelegramClient,
) -> anyhow::Result<BotUser> {
    if config.auto_run_migrations {
        db.run_migrations()
            .await
            .context("failed to apply database migrations")?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    let players = count_players(db)
        .await
        .context("player store is not reachable")?;
    info!(players, backend = db.backend_name(), "Player store ready.");

    let me = telegram
        .get_me()
        .await
        .context("failed to fetch bot identity")?;
    info!(bot_id = me.id, username = ?me.username, "Bot identity confirmed.");

    if let Err(err) = telegram
        .set_my_commands(&hearth_commands::bot_commands())
        .await
    {
        warn!(?err, "Failed to register the command menu; continuing without it.");
    }

    let url = config.webhook_url();
    telegram
        .set_webhook(&WebhookOptions {
            url: url.clone(),
            secret_token: config.webhook_secret.clone(),
            drop_pending_updates: config.drop_pending_updates,
            allowed_updates: vec!["message".to_owned()],
        })
        .await
        .context("failed to register webhook")?;
    info!(%url, "Webhook registered.");

    Ok(me)
}

/// Deregister the webhook and release pooled connections. Failures are only logged.
pub async fn stop(data: &Data) {
    match data.telegram.delete_webhook(false).await {
        Ok(()) => info!("Webhook removed."),
        Err(err) => warn!(?err, "Failed to remove webhook."),
    }

    data.db.close().await;
    info!("Hearth has gone to sleep.");
}

/// Resolve on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(?err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(?err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("Shutdown signal received, draining in-flight updates.");
}
