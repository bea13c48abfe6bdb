use std::env;
use std::fmt;

use anyhow::{Context as _, bail};
use hearth_telegram::DEFAULT_API_URL;

/// Path Telegram posts updates to.
pub const WEBHOOK_PATH: &str = "/webhook";
pub const DEFAULT_PORT: u16 = 10000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// `DATABASE_URL` value selecting the in-process player store.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub database_url: String,
    /// Externally reachable base URL, without a trailing slash.
    pub base_url: String,
    pub port: u16,
    pub webhook_secret: Option<String>,
    pub database_max_connections: u32,
    pub auto_run_migrations: bool,
    pub drop_pending_updates: bool,
    pub telegram_api_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("port", &self.port)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "<redacted>"))
            .field("database_max_connections", &self.database_max_connections)
            .field("auto_run_migrations", &self.auto_run_migrations)
            .field("drop_pending_updates", &self.drop_pending_updates)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; missing required values are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
        };

        let bot_token = value("BOT_TOKEN").context("BOT_TOKEN must be set")?;
        let database_url = value("DATABASE_URL").context("DATABASE_URL must be set")?;
        let base_url = value("WEBHOOK_BASE_URL")
            .or_else(|| value("RENDER_EXTERNAL_URL"))
            .context("WEBHOOK_BASE_URL (or RENDER_EXTERNAL_URL) must be set")?;

        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            bail!("WEBHOOK_BASE_URL must be an absolute http(s) URL, got `{base_url}`");
        }

        let port = match value("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got `{raw}`"))?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match value("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|max| *max > 0)
                .with_context(|| {
                    format!("DATABASE_MAX_CONNECTIONS must be a positive number, got `{raw}`")
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let webhook_secret = value("WEBHOOK_SECRET");
        if let Some(secret) = &webhook_secret
            && !is_valid_secret(secret)
        {
            bail!("WEBHOOK_SECRET must be 1-256 characters of A-Z, a-z, 0-9, `_` or `-`");
        }

        Ok(Self {
            bot_token,
            database_url,
            base_url: base_url.trim_end_matches('/').to_owned(),
            port,
            webhook_secret,
            database_max_connections,
            auto_run_migrations: parse_bool(value("AUTO_RUN_MIGRATIONS"), true),
            drop_pending_updates: parse_bool(value("DROP_PENDING_UPDATES"), true),
            telegram_api_url: value("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
        })
    }

    /// Whether players live in process memory instead of Postgres (lost on restart).
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.eq_ignore_ascii_case(MEMORY_DATABASE_URL)
    }

    pub fn webhook_url(&self) -> String {
        format!("{}{}", self.base_url, WEBHOOK_PATH)
    }
}

fn parse_bool(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(value) => matches!(
            value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

fn is_valid_secret(secret: &str) -> bool {
    (1..=256).contains(&secret.len())
        && secret
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}
