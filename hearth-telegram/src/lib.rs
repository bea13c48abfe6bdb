//! Minimal Telegram Bot API client and the typed update model the bot accepts.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_API_URL, TelegramClient, WebhookOptions};
pub use error::TelegramError;
pub use types::{
    BotCommand, BotUser, Chat, ChatKind, Message, ParseMode, ReplyParameters, SendMessage,
    SentMessage, Update, UpdateKind, User,
};
