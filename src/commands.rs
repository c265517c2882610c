//! Bot commands and their parsing from message text.

use strum::{Display, EnumIter};
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
#[command(rename_rule = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    #[command(description = "запустить бота")]
    Start,
    #[command(description = "помощь")]
    Help,
    #[command(description = "конвертировать валюты")]
    Convert,
}

impl Command {
    /// Parse `/command` or `/command@botname` from a message.
    ///
    /// Commands addressed to a different bot, unknown commands and commands
    /// followed by arguments are not commands.
    pub fn from_text(text: &str, bot_username: Option<&str>) -> Option<Self> {
        Self::parse(text.trim(), bot_username.unwrap_or_default()).ok()
    }
}

/// The `/help` text, one line per command.
pub fn help_text() -> String {
    Command::bot_commands()
        .iter()
        .map(|command| {
            format!(
                "/{} - {}",
                command.command.trim_start_matches('/'),
                command.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
