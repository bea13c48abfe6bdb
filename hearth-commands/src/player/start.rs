use hearth_core::{Data, Error};
use hearth_database::impls::players::register_player;
use hearth_database::model::player::NewPlayer;
use hearth_telegram::SendMessage;
use hearth_utils::formatting::display_name;
use tracing::info;

use crate::player::replies::{welcome_back_message, welcome_message};
use crate::{CommandMeta, Invocation};

pub const META: CommandMeta = CommandMeta {
    name: "start",
    desc: "Create your profile or say hello again.",
    category: "player",
    usage: "/start",
};

pub async fn start(data: &Data, invocation: &Invocation<'_>) -> Result<SendMessage, Error> {
    let sender = invocation.sender;
    let new_player = NewPlayer {
        user_id: sender.id,
        username: sender.username.clone(),
        first_name: sender.first_name.clone(),
    };

    let registration = register_player(&data.db, &new_player).await?;
    let name = display_name(
        sender.first_name.as_deref(),
        sender.username.as_deref(),
        sender.id,
    );

    let text = if registration.created {
        info!(
            user_id = sender.id,
            payload = invocation.args,
            "new player joined"
        );
        welcome_message(&name, &registration.player)
    } else {
        welcome_back_message(&name, &registration.player)
    };

    Ok(invocation.reply(text))
}
