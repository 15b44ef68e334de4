//! Bot command set, parsed with teloxide's `BotCommands` derive.

use teloxide::utils::command::{BotCommands, ParseError};

/// Commands understood by the bot. Descriptions feed Telegram's command menu.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "welcome message")]
    Start,
    #[command(description = "how to use this bot")]
    Help,
    #[command(description = "identify the characters in the next anime screenshot you send")]
    Name,
}

/// Outcome of parsing a text message as a command.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedCommand {
    Known(Command),
    /// `/something` this bot does not implement.
    Unknown,
    /// `/cmd@other_bot` in a group: not for us.
    OtherBot,
    NotACommand,
}

/// True when the text looks like a bot command.
pub fn is_command(text: &str) -> bool {
    text.trim_start().starts_with('/')
}

impl Command {
    /// Parses `/cmd` and `/cmd@bot_username`. Pass an empty username when it is not known yet.
    pub fn parse_text(text: &str, bot_username: &str) -> ParsedCommand {
        let text = text.trim();
        if !is_command(text) {
            return ParsedCommand::NotACommand;
        }
        match Command::parse(text, bot_username) {
            Ok(cmd) => ParsedCommand::Known(cmd),
            Err(ParseError::WrongBotName(_)) => ParsedCommand::OtherBot,
            Err(_) => ParsedCommand::Unknown,
        }
    }
}
