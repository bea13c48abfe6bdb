pub mod player;
pub mod utility;

use hearth_core::{Data, Error};
use hearth_telegram::{BotCommand, SendMessage, Update, UpdateKind, User};
use hearth_utils::parse::parse_command;
use tracing::debug;

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    player::start::META,
    player::profile::META,
    utility::help::META,
];

/// A recognised command together with the message that carried it.
pub struct Invocation<'a> {
    pub chat_id: i64,
    pub message_id: i64,
    pub sender: &'a User,
    pub args: &'a str,
}

impl Invocation<'_> {
    /// Reply in the originating chat, threaded under the triggering message.
    pub fn reply(&self, text: impl Into<String>) -> SendMessage {
        SendMessage::new(self.chat_id, text).reply_to(self.message_id)
    }
}

/// Command menu entries for `setMyCommands`.
pub fn bot_commands() -> Vec<BotCommand> {
    COMMANDS
        .iter()
        .map(|command| BotCommand {
            command: command.name.to_owned(),
            description: command.desc.to_owned(),
        })
        .collect()
}

/// Route an update to its command handler.
///
/// Returns `Ok(None)` for anything that is not a known command addressed to this bot.
pub async fn dispatch(data: &Data, update: &Update) -> Result<Option<SendMessage>, Error> {
    let UpdateKind::Message(message) = &update.kind else {
        debug!(update_id = update.update_id, "ignoring unsupported update");
        return Ok(None);
    };

    let (Some(sender), Some(text)) = (message.from.as_ref(), message.text.as_deref()) else {
        return Ok(None);
    };

    let Some(command) = parse_command(text) else {
        return Ok(None);
    };

    if !command.is_addressed_to(data.bot_username.as_deref()) {
        debug!(mention = ?command.mention, "ignoring command addressed to another bot");
        return Ok(None);
    }

    let invocation = Invocation {
        chat_id: message.chat.id,
        message_id: message.message_id,
        sender,
        args: command.args,
    };

    let reply = match command.name.as_str() {
        "start" => player::start::start(data, &invocation).await?,
        "profile" => player::profile::profile(data, &invocation).await?,
        "help" => utility::help::help(&invocation),
        other => {
            debug!(command = other, user_id = sender.id, "unknown command");
            return Ok(None);
        }
    };

    debug!(
        command = %command.name,
        user_id = sender.id,
        chat_id = invocation.chat_id,
        "command handled"
    );
    Ok(Some(reply))
}
