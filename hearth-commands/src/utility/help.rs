use hearth_telegram::SendMessage;

use crate::{COMMANDS, CommandMeta, Invocation};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "List the available commands.",
    category: "utility",
    usage: "/help",
};

pub fn help(invocation: &Invocation<'_>) -> SendMessage {
    invocation.reply(help_message(COMMANDS))
}

/// Command list grouped by category, categories in table order.
pub fn help_message(commands: &[CommandMeta]) -> String {
    let mut out = String::from("📚 Available commands:");
    let mut categories: Vec<&str> = Vec::new();
    for command in commands {
        if !categories.contains(&command.category) {
            categories.push(command.category);
        }
    }

    for category in categories {
        out.push_str(&format!("\n\n{}:", display_category(category)));
        for command in commands.iter().filter(|c| c.category == category) {
            out.push_str(&format!("\n{} - {}", command.usage, command.desc));
        }
    }

    out
}

fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::help_message;
    use crate::{COMMANDS, CommandMeta};

    #[test]
    fn lists_every_command_under_its_category() {
        let text = help_message(COMMANDS);
        assert!(text.starts_with("📚 Available commands:"));

        let player = text.find("Player:").expect("player heading");
        let utility = text.find("Utility:").expect("utility heading");
        let start = text.find("/start - ").expect("start entry");
        let profile = text.find("/profile - ").expect("profile entry");
        let help = text.find("/help - ").expect("help entry");

        assert!(player < start && start < profile && profile < utility);
        assert!(utility < help);
    }

    #[test]
    fn interleaved_categories_are_grouped() {
        const TABLE: &[CommandMeta] = &[
            CommandMeta { name: "a", desc: "A", category: "one", usage: "/a" },
            CommandMeta { name: "b", desc: "B", category: "two", usage: "/b" },
            CommandMeta { name: "c", desc: "C", category: "one", usage: "/c" },
        ];

        assert_eq!(
            help_message(TABLE),
            "📚 Available commands:\n\nOne:\n/a - A\n/c - C\n\nTwo:\n/b - B"
        );
    }

    #[test]
    fn empty_table_only_has_the_heading() {
        assert_eq!(help_message(&[]), "📚 Available commands:");
    }
}
