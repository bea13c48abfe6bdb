use hearth_core::{Data, Error};
use hearth_database::impls::players::get_player;
use hearth_telegram::{ParseMode, SendMessage};
use hearth_utils::formatting::display_name;

use crate::player::replies::{NOT_REGISTERED_MESSAGE, profile_message};
use crate::{CommandMeta, Invocation};

pub const META: CommandMeta = CommandMeta {
    name: "profile",
    desc: "Show your level, experience and credits.",
    category: "player",
    usage: "/profile",
};

pub async fn profile(data: &Data, invocation: &Invocation<'_>) -> Result<SendMessage, Error> {
    let Some(player) = get_player(&data.db, invocation.sender.id).await? else {
        return Ok(invocation.reply(NOT_REGISTERED_MESSAGE));
    };

    let name = display_name(
        player.first_name.as_deref(),
        player.username.as_deref(),
        player.user_id,
    );

    Ok(invocation
        .reply(profile_message(&name, &player))
        .parse_mode(ParseMode::Html))
}
