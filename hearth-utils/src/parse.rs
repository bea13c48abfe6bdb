use crate::COMMAND_PREFIX;

/// A bot command split out of message text, e.g. `/start@hearth_bot ref42`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Lowercased command name without the prefix.
    pub name: String,
    /// Bot username the command was addressed to, if any.
    pub mention: Option<&'a str>,
    /// Remaining text after the command token, trimmed.
    pub args: &'a str,
}

impl ParsedCommand<'_> {
    /// Whether the command may be handled by the bot called `bot_username`.
    ///
    /// Unaddressed commands are for everyone; an unknown bot username accepts any mention.
    pub fn is_addressed_to(&self, bot_username: Option<&str>) -> bool {
        match (self.mention, bot_username) {
            (None, _) | (_, None) => true,
            (Some(mention), Some(own)) => mention.eq_ignore_ascii_case(own.trim_start_matches('@')),
        }
    }
}

/// Parse a command like `/start`, `/Profile`, or `/help@my_bot extra words`.
pub fn parse_command(text: &str) -> Option<ParsedCommand<'_>> {
    let input = text.trim_start();
    let rest = input.strip_prefix(COMMAND_PREFIX)?;

    let (token, args) = match rest.find(char::is_whitespace) {
        Some(idx) => (&rest[..idx], rest[idx..].trim()),
        None => (rest, ""),
    };

    let (name, mention) = match token.split_once('@') {
        Some((name, mention)) => {
            if mention.is_empty() {
                return None;
            }
            (name, Some(mention))
        }
        None => (token, None),
    };

    if name.is_empty()
        || !name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    {
        return None;
    }

    Some(ParsedCommand {
        name: name.to_ascii_lowercase(),
        mention,
        args,
    })
}
