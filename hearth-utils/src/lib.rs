/// Shared formatting helpers (display names, dates, HTML escaping).
pub mod formatting;
/// Single source of truth for the bot command prefix.
pub const COMMAND_PREFIX: char = '/';
/// Pure parser helpers.
pub mod parse;
