use hearth_database::model::player::{EXP_PER_LEVEL, Player};
use hearth_utils::formatting::{escape_html, format_join_date};

pub const NOT_REGISTERED_MESSAGE: &str =
    "You are not registered yet. Send /start to create your profile.";

pub fn welcome_message(name: &str, player: &Player) -> String {
    format!(
        "👋 Welcome, {}! Your profile has been created.\n\
         Level: {}\n\
         Credits: {}\n\
         Use /profile to see your stats or /help for the command list.",
        name, player.level, player.credits
    )
}

pub fn welcome_back_message(name: &str, player: &Player) -> String {
    format!(
        "👋 Welcome back, {}!\nLevel: {}\nCredits: {}",
        name, player.level, player.credits
    )
}

/// Profile card for HTML parse mode; `name` is escaped here.
pub fn profile_message(name: &str, player: &Player) -> String {
    format!(
        "<b>👤 {}</b>\n\
         Level: {}\n\
         Exp: {}/{}\n\
         Credits: {}\n\
         Joined: {}",
        escape_html(name),
        player.level,
        player.exp,
        EXP_PER_LEVEL,
        player.credits,
        format_join_date(&player.joined_at)
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use hearth_database::model::player::Player;

    use super::{profile_message, welcome_back_message, welcome_message};

    fn player() -> Player {
        Player {
            user_id: 42,
            username: Some("ann_k".to_owned()),
            first_name: Some("Ann".to_owned()),
            level: 3,
            exp: 57,
            credits: 1250,
            joined_at: Utc.with_ymd_and_hms(2024, 2, 9, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn profile_lists_every_stat() {
        let text = profile_message("Ann", &player());
        assert_eq!(
            text,
            "<b>👤 Ann</b>\nLevel: 3\nExp: 57/100\nCredits: 1250\nJoined: 09.02.2024"
        );
    }

    #[test]
    fn profile_escapes_names() {
        let text = profile_message("<Ann & co>", &player());
        assert!(text.starts_with("<b>👤 &lt;Ann &amp; co&gt;</b>"));
    }

    #[test]
    fn greetings_include_level_and_credits() {
        let welcome = welcome_message("Ann", &player());
        assert!(welcome.contains("Welcome, Ann!"));
        assert!(welcome.contains("Level: 3"));
        assert!(welcome.contains("Credits: 1250"));

        let back = welcome_back_message("Ann", &player());
        assert!(back.contains("Welcome back, Ann!"));
        assert!(back.contains("Level: 3"));
        assert!(back.contains("Credits: 1250"));
    }
}
