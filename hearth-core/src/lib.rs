use hearth_database::Database;
use hearth_telegram::TelegramClient;

pub type Error = anyhow::Error;

/// Application context built once at startup and shared with every handler.
#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub telegram: TelegramClient,
    /// Bot username from `getMe`, used to ignore commands addressed to other bots.
    pub bot_username: Option<String>,
}
